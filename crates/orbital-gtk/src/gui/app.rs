use crate::events::AppEvent;
use crate::gui::theme::ThemeColors;
use crate::gui::{view, window};
use gtk::prelude::*;
use gtk4 as gtk;
use orbital::{ControlCommand, Layer, OrbitEngine, Status, Visibility, config};
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

pub struct AppModel {
    pub engine: Rc<RefCell<OrbitEngine>>,
    pub status: Status,
    pub visibility: Visibility,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    TogglePlay,
    SetVisible(Layer, bool),
    Command(ControlCommand),
    StatusChanged,
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Command(c) => AppMsg::Command(c),
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

impl AppModel {
    fn sync(&mut self) {
        let engine = self.engine.borrow();
        self.status = engine.status();
        self.visibility = engine.visibility();
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (OrbitEngine, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Circle rotation animation"),
            set_resizable: false,
            add_css_class: "orbital-window",

            gtk::Box {
                set_orientation: gtk::Orientation::Horizontal,

                #[name = "drawing_area"]
                gtk::DrawingArea {
                    add_css_class: "orbital-drawing-area",
                },

                #[name = "command_pane"]
                gtk::Box {
                    set_orientation: gtk::Orientation::Vertical,
                    set_spacing: 5,
                    set_width_request: 180,
                    set_margin_top: 10,
                    set_margin_bottom: 10,
                    set_margin_start: 10,
                    set_margin_end: 10,

                    gtk::CheckButton {
                        set_label: Some("Show lines"),
                        #[watch]
                        #[block_signal(lines_toggled)]
                        set_active: model.visibility.lines,
                        connect_toggled[sender] => move |btn| {
                            sender.input(AppMsg::SetVisible(Layer::Lines, btn.is_active()));
                        } @lines_toggled,
                    },

                    gtk::CheckButton {
                        set_label: Some("Show inner circle"),
                        #[watch]
                        #[block_signal(inner_toggled)]
                        set_active: model.visibility.inner_circle,
                        connect_toggled[sender] => move |btn| {
                            sender.input(AppMsg::SetVisible(Layer::InnerCircle, btn.is_active()));
                        } @inner_toggled,
                    },

                    gtk::CheckButton {
                        set_label: Some("Show rotate circle"),
                        #[watch]
                        #[block_signal(rotate_toggled)]
                        set_active: model.visibility.rotate_circle,
                        connect_toggled[sender] => move |btn| {
                            sender.input(AppMsg::SetVisible(Layer::RotateCircle, btn.is_active()));
                        } @rotate_toggled,
                    },

                    gtk::Button {
                        #[watch]
                        set_label: if model.status == Status::Running { "Stop" } else { "Play" },
                        connect_clicked => AppMsg::TogglePlay,
                    },
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (engine, rx) = init;

        let engine = Rc::new(RefCell::new(engine));

        let mut model = AppModel {
            engine: engine.clone(),
            status: Status::Stopped,
            visibility: Visibility::default(),
            drawing_area: gtk::DrawingArea::default(),
        };
        model.sync();

        let widgets = view_output!();

        model.drawing_area = widgets.drawing_area.clone();
        window::set_stage_size(&model.drawing_area, engine.borrow().scene().stage);

        let engine_draw = engine.clone();
        let colors = ThemeColors::default();
        widgets
            .drawing_area
            .set_draw_func(move |_, cr, _, _| {
                if let Err(e) = view::draw(cr, &engine_draw.borrow(), &colors) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let tick_sender = sender.clone();
        window::start_ticking(&widgets.drawing_area, engine, move |_| {
            tick_sender.input(AppMsg::StatusChanged);
        });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::TogglePlay => {
                let status = self.engine.borrow_mut().toggle();
                log::info!("Animation {}", status);
            }
            AppMsg::SetVisible(layer, visible) => {
                self.engine.borrow_mut().set_visible(layer, visible);
            }
            AppMsg::Command(command) => {
                log::debug!("Control command: {}", command);
                self.engine.borrow_mut().apply(command);
            }
            AppMsg::StatusChanged => {}
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    *self.engine.borrow_mut() = OrbitEngine::new(&new_config);
                    window::set_stage_size(&self.drawing_area, new_config.stage);
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
        self.sync();
        self.drawing_area.queue_draw();
    }
}
