use crate::config;
use crate::events::AppEvent;
use crate::gui::carousel::{self, Stage};
use crate::gui::pointer::{PointerChange, PointerSubscription, pointer_change};
use crate::gui::theme::{self, ThemeColors};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use spindle_core::carousel::CarouselState;
use spindle_core::geometry::Point;
use std::cell::RefCell;
use std::rc::Rc;

pub struct AppModel {
    pub stage: Rc<RefCell<Stage>>,
    pub visible: bool,
    pub dragging: bool,
    pub caption: String,
    pub indicator: String,
    pub arrow_size: i32,
    pointer: Option<PointerSubscription>,
    drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Show,
    Hide,
    Next,
    Previous,
    Goto(i64),
    PointerDown(Point),
    PointerMove(f64),
    PointerUp(f64),
    PointerLeave,
    DragCancel,
    ConfigReload,
    EditConfig,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Show => AppMsg::Show,
            AppEvent::Hide => AppMsg::Hide,
            AppEvent::Next => AppMsg::Next,
            AppEvent::Previous => AppMsg::Previous,
            AppEvent::Goto(index) => AppMsg::Goto(index),
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Stage, i32, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Spindle"),
            set_default_width: 1200,
            set_default_height: 640,
            #[watch]
            set_visible: model.visible,

            add_controller = gtk::EventControllerKey {
                set_propagation_phase: gtk::PropagationPhase::Capture,
                connect_key_pressed[sender] => move |_, key, _, _| {
                    let msg = if key == gtk::gdk::Key::Escape {
                        AppMsg::Hide
                    } else if key == gtk::gdk::Key::Left {
                        AppMsg::Previous
                    } else if key == gtk::gdk::Key::Right {
                        AppMsg::Next
                    } else if key == gtk::gdk::Key::Home {
                        AppMsg::Goto(0)
                    } else if key == gtk::gdk::Key::End {
                        AppMsg::Goto(-1)
                    } else if key == gtk::gdk::Key::F1 {
                        AppMsg::EditConfig
                    } else {
                        return glib::Propagation::Proceed;
                    };
                    sender.input(msg);
                    glib::Propagation::Stop
                }
            },

            gtk::Box {
                set_orientation: gtk::Orientation::Vertical,

                #[name = "drawing_area"]
                gtk::DrawingArea {
                    set_hexpand: true,
                    set_vexpand: true,
                    add_css_class: "spindle-stage",

                    add_controller = gtk::GestureDrag {
                        connect_drag_begin[sender] => move |_, x, y| {
                            sender.input(AppMsg::PointerDown(Point::new(x, y)));
                        },
                        connect_drag_end[sender] => move |gesture, offset_x, _| {
                            if let Some((start_x, _)) = gesture.start_point() {
                                sender.input(AppMsg::PointerUp(start_x + offset_x));
                            }
                        },
                        connect_cancel[sender] => move |_, _| {
                            sender.input(AppMsg::DragCancel);
                        },
                    },
                },

                gtk::CenterBox {
                    set_margin_all: 12,

                    #[wrap(Some)]
                    set_start_widget = &gtk::Button {
                        set_tooltip_text: Some("Previous image"),
                        add_css_class: "flat",
                        #[watch]
                        set_sensitive: !model.dragging,
                        connect_clicked => AppMsg::Previous,

                        #[wrap(Some)]
                        set_child = &gtk::Image {
                            set_icon_name: Some("go-previous-symbolic"),
                            #[watch]
                            set_pixel_size: model.arrow_size,
                        },
                    },

                    #[wrap(Some)]
                    set_center_widget = &gtk::Box {
                        set_orientation: gtk::Orientation::Vertical,
                        set_spacing: 2,

                        gtk::Label {
                            add_css_class: "spindle-caption",
                            #[watch]
                            set_label: &model.caption,
                        },

                        gtk::Label {
                            add_css_class: "spindle-indicator",
                            #[watch]
                            set_label: &model.indicator,
                        },
                    },

                    #[wrap(Some)]
                    set_end_widget = &gtk::Button {
                        set_tooltip_text: Some("Next image"),
                        add_css_class: "flat",
                        #[watch]
                        set_sensitive: !model.dragging,
                        connect_clicked => AppMsg::Next,

                        #[wrap(Some)]
                        set_child = &gtk::Image {
                            set_icon_name: Some("go-next-symbolic"),
                            #[watch]
                            set_pixel_size: model.arrow_size,
                        },
                    },
                },
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (stage, arrow_size, rx) = init;

        theme::load_css();

        let mut model = AppModel {
            stage: Rc::new(RefCell::new(stage)),
            visible: true,
            dragging: false,
            caption: String::new(),
            indicator: String::new(),
            arrow_size,
            pointer: None,
            drawing_area: gtk::DrawingArea::default(),
        };
        model.refresh_labels();

        let widgets = view_output!();

        model.drawing_area = widgets.drawing_area.clone();

        let stage_draw = model.stage.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, width, height| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                let mut stage = stage_draw.borrow_mut();
                stage.set_viewport(width as f64, height as f64);
                if let Err(e) = carousel::draw(cr, &stage, &colors) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        let redraw = match msg {
            AppMsg::Show => {
                self.visible = true;
                true
            }
            AppMsg::Hide => {
                self.visible = false;
                self.stage.borrow_mut().cancel_drag()
            }
            AppMsg::Next => self.navigate(|c| c.next()),
            AppMsg::Previous => self.navigate(|c| c.previous()),
            AppMsg::Goto(index) => self.navigate(|c| c.jump_to(index)),
            AppMsg::PointerDown(point) => self.stage.borrow_mut().pointer_down(point),
            AppMsg::PointerMove(x) => self.stage.borrow_mut().pointer_move(x),
            AppMsg::PointerUp(x) => self.stage.borrow_mut().pointer_up(x),
            AppMsg::PointerLeave => self.stage.borrow_mut().pointer_leave(),
            AppMsg::DragCancel => self.stage.borrow_mut().cancel_drag(),
            AppMsg::ConfigReload => self.reload(),
            AppMsg::EditConfig => {
                match config::write_default_config() {
                    Ok(path) => {
                        if let Err(e) = std::process::Command::new("xdg-open").arg(&path).spawn() {
                            log::error!("Failed to open {}: {}", path.display(), e);
                        }
                    }
                    Err(e) => log::error!("Failed to write default config: {}", e),
                }
                false
            }
        };

        self.sync_pointer(&sender);
        self.refresh_labels();
        if redraw {
            self.drawing_area.queue_draw();
        }
    }
}

impl AppModel {
    fn navigate(&mut self, step: impl FnOnce(&mut CarouselState) -> Option<usize>) -> bool {
        match step(&mut self.stage.borrow_mut().carousel) {
            Some(index) => {
                log::debug!("Showing item {}", index);
                true
            }
            None => {
                log::debug!("Navigation ignored while dragging");
                false
            }
        }
    }

    /// Holds the motion subscription exactly while a drag is running.
    fn sync_pointer(&mut self, sender: &ComponentSender<Self>) {
        let dragging = self.stage.borrow().is_dragging();
        match pointer_change(self.pointer.is_some(), dragging) {
            PointerChange::Attach => {
                let (move_sender, leave_sender) = (sender.clone(), sender.clone());
                self.pointer = Some(PointerSubscription::attach(
                    &self.drawing_area,
                    move |x| move_sender.input(AppMsg::PointerMove(x)),
                    move || leave_sender.input(AppMsg::PointerLeave),
                ));
            }
            PointerChange::Release => self.pointer = None,
            PointerChange::Keep => {}
        }
        self.dragging = dragging;
    }

    fn refresh_labels(&mut self) {
        let stage = self.stage.borrow();
        self.caption = stage.caption().map(|c| c.to_string()).unwrap_or_default();
        self.indicator = stage.indicator();
    }

    fn reload(&mut self) -> bool {
        let new_config = match config::load_config() {
            Ok(c) => c,
            Err(e) => {
                log::error!("Failed to reload config: {}", e);
                return false;
            }
        };

        match self.stage.borrow_mut().reload(new_config.items(), &new_config) {
            Ok(()) => {
                self.arrow_size = new_config.arrow_size;
                log::info!("Configuration reloaded");
                true
            }
            Err(e) => {
                log::error!("Failed to apply config: {}", e);
                false
            }
        }
    }
}
