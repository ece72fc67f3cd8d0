use crate::config::Config;
use crate::gui::carousel::PIXBUF_OVERSAMPLE;
use gdk_pixbuf::Pixbuf;
use spindle_core::carousel::layout;
use spindle_core::carousel::{
    CarouselError, CarouselState, GestureConfig, GestureOutcome, LayoutConfig, VisualTransform,
};
use spindle_core::geometry::{Point, Size};
use spindle_core::source::{Caption, CarouselItem};

#[derive(Clone)]
pub struct Frame {
    pub item: CarouselItem,
    pub pixbuf: Option<Pixbuf>,
}

impl Frame {
    pub fn new(item: CarouselItem, size: Size) -> Self {
        let pixbuf = Self::load_image(&item, size);
        Self { item, pixbuf }
    }

    fn load_image(item: &CarouselItem, size: Size) -> Option<Pixbuf> {
        let path = item.source.path()?;
        let size = size.scaled(PIXBUF_OVERSAMPLE);
        Pixbuf::from_file_at_scale(path, size.width as i32, size.height as i32, true)
            .inspect_err(|e| log::warn!("Failed to load {}: {}", path.display(), e))
            .ok()
    }

    /// A file source that could not be decoded.
    pub fn is_broken(&self) -> bool {
        self.pixbuf.is_none() && !self.item.source.is_placeholder()
    }
}

/// Everything the carousel window draws and hit-tests against.
pub struct Stage {
    pub frames: Vec<Frame>,
    pub carousel: CarouselState,
    pub layout: LayoutConfig,
    pub gesture: GestureConfig,
    pub item_size: Size,
    pub center: Point,
    press_point: Point,
}

impl Stage {
    pub fn new(items: Vec<CarouselItem>, config: &Config) -> Result<Self, CarouselError> {
        let frames = Self::load_frames(items, config.item_size());
        Ok(Self {
            carousel: CarouselState::new(frames.len())?,
            frames,
            layout: config.layout(),
            gesture: config.gesture(),
            item_size: config.item_size(),
            center: Point::default(),
            press_point: Point::default(),
        })
    }

    fn load_frames(items: Vec<CarouselItem>, size: Size) -> Vec<Frame> {
        items
            .into_iter()
            .map(|item| Frame::new(item, size))
            .collect()
    }

    /// Swaps in new items and settings. Any running drag is dropped.
    pub fn reload(&mut self, items: Vec<CarouselItem>, config: &Config) -> Result<(), CarouselError> {
        let frames = Self::load_frames(items, config.item_size());
        self.carousel.resize(frames.len())?;
        self.frames = frames;
        self.layout = config.layout();
        self.gesture = config.gesture();
        self.item_size = config.item_size();
        Ok(())
    }

    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.center = Point::new(width / 2.0, height / 2.0);
    }

    pub fn transforms(&self) -> Vec<VisualTransform> {
        self.carousel.transforms(&self.gesture, &self.layout)
    }

    pub fn current_frame(&self) -> &Frame {
        &self.frames[self.carousel.current_index()]
    }

    pub fn caption(&self) -> Option<&Caption> {
        self.current_frame().item.caption.as_ref()
    }

    pub fn indicator(&self) -> String {
        self.carousel.indicator()
    }

    pub fn is_dragging(&self) -> bool {
        self.carousel.is_dragging()
    }

    pub fn pointer_down(&mut self, point: Point) -> bool {
        if !self.carousel.press(point.x) {
            return false;
        }
        self.press_point = point;
        true
    }

    pub fn pointer_move(&mut self, x: f64) -> bool {
        self.carousel.drag_to(x)
    }

    /// Ends the drag at `x`. A tap selects the item under the pointer.
    pub fn pointer_up(&mut self, x: f64) -> bool {
        self.carousel.drag_to(x);
        match self.carousel.release(&self.gesture) {
            GestureOutcome::Ignored => false,
            GestureOutcome::Tapped { x } => {
                self.select_at(Point::new(x, self.press_point.y));
                true
            }
            GestureOutcome::Settled => true,
            GestureOutcome::Moved { delta } => {
                log::debug!("Drag moved carousel by {}", delta);
                true
            }
        }
    }

    /// The pointer left the stage mid-drag: commit what was dragged so far,
    /// but never treat it as a tap.
    pub fn pointer_leave(&mut self) -> bool {
        if !self.carousel.is_dragging() {
            return false;
        }
        if let GestureOutcome::Moved { delta } = self.carousel.release(&self.gesture) {
            log::debug!("Drag left the stage, moved carousel by {}", delta);
        }
        true
    }

    pub fn cancel_drag(&mut self) -> bool {
        self.carousel.cancel()
    }

    /// Click-to-select. Returns the new index if it changed.
    pub fn select_at(&mut self, point: Point) -> Option<usize> {
        let index = layout::hit_test(point, self.center, self.item_size, &self.transforms())?;
        if index == self.carousel.current_index() {
            return None;
        }
        self.carousel.jump_to(index as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gui::pointer::{PointerChange, pointer_change};

    fn stage(count: usize) -> Stage {
        let mut stage = Stage::new(CarouselItem::placeholders(count), &Config::default()).unwrap();
        stage.set_viewport(1200.0, 600.0);
        stage
    }

    #[test]
    fn empty_stage_is_rejected() {
        assert!(matches!(
            Stage::new(Vec::new(), &Config::default()),
            Err(CarouselError::Empty)
        ));
    }

    #[test]
    fn placeholders_are_neither_loaded_nor_broken() {
        let stage = stage(3);
        assert!(stage.frames.iter().all(|f| f.pixbuf.is_none()));
        assert!(stage.frames.iter().all(|f| !f.is_broken()));
        assert_eq!(stage.indicator(), "1 / 3");
        assert_eq!(stage.caption(), Some(&Caption::new("Placeholder 1")));
    }

    #[test]
    fn tapping_a_neighbor_selects_it() {
        let mut stage = stage(7);
        assert!(stage.pointer_down(Point::new(900.0, 300.0)));
        assert!(stage.pointer_up(900.0));
        assert_eq!(stage.carousel.current_index(), 1);
        assert_eq!(stage.caption(), Some(&Caption::new("Placeholder 2")));
    }

    #[test]
    fn tapping_the_center_or_empty_space_keeps_the_index() {
        let mut stage = stage(7);
        stage.pointer_down(Point::new(600.0, 300.0));
        stage.pointer_up(601.0);
        assert_eq!(stage.carousel.current_index(), 0);

        stage.pointer_down(Point::new(600.0, 5.0));
        stage.pointer_up(600.0);
        assert_eq!(stage.carousel.current_index(), 0);
    }

    #[test]
    fn dragging_right_shows_the_previous_item() {
        let mut stage = stage(7);
        stage.pointer_down(Point::new(500.0, 300.0));
        assert!(stage.pointer_move(530.0));
        assert!(stage.is_dragging());
        stage.pointer_up(560.0);
        assert!(!stage.is_dragging());
        assert_eq!(stage.carousel.current_index(), 6);
        assert_eq!(stage.indicator(), "7 / 7");
    }

    #[test]
    fn leaving_the_stage_commits_the_drag() {
        let mut stage = stage(7);
        stage.pointer_down(Point::new(500.0, 300.0));
        stage.pointer_move(400.0);
        assert!(stage.pointer_leave());
        assert_eq!(stage.carousel.current_index(), 1);
        // the late release from the toolkit is ignored
        assert!(!stage.pointer_up(380.0));
        assert_eq!(stage.carousel.current_index(), 1);
    }

    #[test]
    fn cancel_discards_the_drag() {
        let mut stage = stage(7);
        stage.pointer_down(Point::new(500.0, 300.0));
        stage.pointer_move(100.0);
        assert!(stage.cancel_drag());
        assert_eq!(stage.carousel.current_index(), 0);
        assert!(!stage.pointer_leave());
    }

    #[test]
    fn every_way_out_of_a_drag_releases_the_pointer() {
        let exits: [(&str, fn(&mut Stage)); 4] = [
            ("release", |s: &mut Stage| {
                s.pointer_up(300.0);
            }),
            ("leave", |s: &mut Stage| {
                s.pointer_leave();
            }),
            ("cancel", |s: &mut Stage| {
                s.cancel_drag();
            }),
            ("reload", |s: &mut Stage| {
                s.reload(CarouselItem::placeholders(4), &Config::default()).unwrap();
            }),
        ];

        for (name, exit) in exits {
            let mut stage = stage(7);
            assert_eq!(pointer_change(false, stage.is_dragging()), PointerChange::Keep);
            stage.pointer_down(Point::new(500.0, 300.0));
            assert_eq!(pointer_change(false, stage.is_dragging()), PointerChange::Attach, "{name}");
            stage.pointer_move(400.0);
            assert_eq!(pointer_change(true, stage.is_dragging()), PointerChange::Keep, "{name}");
            exit(&mut stage);
            assert_eq!(pointer_change(true, stage.is_dragging()), PointerChange::Release, "{name}");
        }
    }

    #[test]
    fn reload_keeps_a_valid_index() {
        let mut stage = stage(7);
        stage.carousel.jump_to(5);
        stage
            .reload(CarouselItem::placeholders(3), &Config::default())
            .unwrap();
        assert_eq!(stage.carousel.current_index(), 2);
        assert_eq!(stage.frames.len(), 3);

        assert!(stage.reload(Vec::new(), &Config::default()).is_err());
        assert_eq!(stage.frames.len(), 3);
    }
}
