use crate::gui::app::{AppModel, AppMsg};
use crate::gui::bar::TAB_BOTTOM_PADDING;
use gtk::prelude::*;
use gtk4 as gtk;
use navmotion::clock::FrameClock;
use navmotion::layout::BarLayout;
use navmotion::scene::Scene;
use navmotion::tab::TabBar;
use relm4::ComponentSender;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Canvas height needed to show the bar plus the part of the indicator above it.
pub fn bar_canvas_height(layout: &BarLayout) -> i32 {
    (layout.height + layout.overflow()).ceil() as i32
}

pub fn resize_bar(canvas: &gtk::DrawingArea, row: &gtk::Box, layout: &BarLayout) {
    canvas.set_content_height(bar_canvas_height(layout));
    row.set_height_request((layout.height as i32 - TAB_BOTTOM_PADDING).max(0));
}

pub fn rebuild_tab_buttons(
    row: &gtk::Box,
    tabs: &TabBar,
    sender: &ComponentSender<AppModel>,
) -> Vec<gtk::Button> {
    while let Some(child) = row.first_child() {
        row.remove(&child);
    }

    tabs.iter()
        .enumerate()
        .map(|(i, tab)| {
            let button = gtk::Button::from_icon_name(tab.icon.as_str());
            button.add_css_class("orbitbar-tab");
            button.add_css_class(&format!("orbitbar-tab-{i}"));
            button.set_hexpand(true);
            button.set_halign(gtk::Align::Center);
            button.set_valign(gtk::Align::Center);

            let sender = sender.clone();
            button.connect_clicked(move |_| sender.input(AppMsg::Select(i)));

            row.append(&button);
            button
        })
        .collect()
}

pub fn sync_selected(buttons: &[gtk::Button], scene: &Scene) {
    for (i, button) in buttons.iter().enumerate() {
        if scene.is_selected(i) {
            button.add_css_class("selected");
        } else {
            button.remove_css_class("selected");
        }
    }
}

/// Advances the scene once per display frame. The bar repaints every frame since the orbit
/// never stops; the rest of the UI is only told about frames that move the selection.
pub fn start_frame_loop(
    canvas: &gtk::DrawingArea,
    scene: Rc<RefCell<Scene>>,
    sender: ComponentSender<AppModel>,
) {
    let clock = Cell::new(FrameClock::new());

    canvas.add_tick_callback(move |canvas, frame_clock| {
        let mut c = clock.get();
        let now = c.elapsed(frame_clock.frame_time());
        clock.set(c);

        let update = scene.borrow_mut().advance(now);
        canvas.queue_draw();
        if update.should_redraw {
            sender.input(AppMsg::Frame);
        }
        glib::ControlFlow::Continue
    });
}
