use crate::events::AppEvent;
use crate::gui::bar;
use crate::gui::theme::{self, ThemeColors};
use crate::gui::window;
use gtk::prelude::*;
use gtk4 as gtk;
use navmotion::config;
use navmotion::scene::Scene;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

pub struct AppModel {
    pub scene: Rc<RefCell<Scene>>,
    pub root: gtk::ApplicationWindow,
    pub body: gtk::DrawingArea,
    pub canvas: gtk::DrawingArea,
    pub tab_row: gtk::Box,
    pub buttons: Vec<gtk::Button>,
    pub tab_css: gtk::CssProvider,
}

#[derive(Debug)]
pub enum AppMsg {
    Select(usize),
    Frame,
    Quit,
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

impl AppModel {
    fn redraw(&self) {
        window::sync_selected(&self.buttons, &self.scene.borrow());
        self.body.queue_draw();
        self.canvas.queue_draw();
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Scene, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Orbit Bar"),
            set_default_width: 420,
            set_default_height: 760,

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Quit);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            #[name = "overlay"]
            gtk::Overlay {
                #[name = "body"]
                gtk::DrawingArea {
                    set_hexpand: true,
                    set_vexpand: true,
                    add_css_class: "orbitbar-body",
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (scene, rx) = init;

        theme::load_css();

        let scene = Rc::new(RefCell::new(scene));

        let widgets = view_output!();

        let canvas = gtk::DrawingArea::new();
        canvas.add_css_class("orbitbar-bar");
        canvas.set_hexpand(true);
        canvas.set_valign(gtk::Align::End);
        canvas.set_can_target(false);

        let tab_row = gtk::Box::new(gtk::Orientation::Horizontal, 0);
        tab_row.add_css_class("orbitbar-tabs");
        tab_row.set_homogeneous(true);
        tab_row.set_valign(gtk::Align::End);
        tab_row.set_margin_bottom(bar::TAB_BOTTOM_PADDING);

        widgets.overlay.add_overlay(&canvas);
        widgets.overlay.add_overlay(&tab_row);

        let (buttons, tab_css) = {
            let scene = scene.borrow();
            window::resize_bar(&canvas, &tab_row, scene.layout());
            (
                window::rebuild_tab_buttons(&tab_row, scene.tabs(), &sender),
                theme::load_tab_css(scene.tabs(), None),
            )
        };

        let scene_draw = scene.clone();
        canvas.set_draw_func(move |area, cr, width, height| {
            let colors = ThemeColors::from_context(&area.style_context());
            let scene = scene_draw.borrow();
            let frame = scene.frame(width as f64, height as f64);
            if let Err(e) = bar::draw_bar(
                cr,
                &frame,
                scene.layout(),
                &colors,
                width as f64,
                height as f64,
            ) {
                log::error!("Drawing error: {}", e);
            }
        });

        let scene_draw = scene.clone();
        widgets
            .body
            .set_draw_func(move |area, cr, width, height| {
                let colors = ThemeColors::from_context(&area.style_context());
                let scene = scene_draw.borrow();
                if let Err(e) = bar::draw_body(
                    cr,
                    scene.color(),
                    scene.layout(),
                    &colors,
                    width as f64,
                    height as f64,
                ) {
                    log::error!("Drawing error: {}", e);
                }
            });

        window::start_frame_loop(&canvas, scene.clone(), sender.clone());

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        let model = AppModel {
            scene,
            root: root.clone(),
            body: widgets.body.clone(),
            canvas,
            tab_row,
            buttons,
            tab_css,
        };
        model.redraw();

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Select(index) => {
                let result = self.scene.borrow_mut().select(index);
                match result {
                    Ok(_) => self.redraw(),
                    Err(e) => log::error!("Ignoring tap: {}", e),
                }
            }
            AppMsg::Frame => self.redraw(),
            AppMsg::Quit => self.root.close(),
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    let result = self.scene.borrow_mut().reconfigure(&new_config);
                    match result {
                        Ok(()) => {
                            let scene = self.scene.borrow();
                            window::resize_bar(&self.canvas, &self.tab_row, scene.layout());
                            self.buttons =
                                window::rebuild_tab_buttons(&self.tab_row, scene.tabs(), &sender);
                            self.tab_css = theme::load_tab_css(scene.tabs(), Some(&self.tab_css));
                            drop(scene);
                            self.redraw();
                            log::info!("Configuration reloaded");
                        }
                        Err(e) => log::error!("Rejected new configuration: {}", e),
                    }
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }
}
