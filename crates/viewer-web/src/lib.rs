#![cfg(target_arch = "wasm32")]
use std::cell::RefCell;
use std::rc::Rc;

use instant::Instant;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

use viewer_core::{ModelConfig, ViewerSession};

mod assets;
mod dom;
mod frame;
mod input;
mod render;

// Button ids in www/index.html mapped to the view names authored into the
// asset. The UI surface is fixed: one button per view, one per configuration.
const VIEW_BUTTONS: [(&str, &str); 4] = [
    ("view-front", "Cam_Front"),
    ("view-side", "Cam_Side"),
    ("view-lenses", "Cam_Lenses"),
    ("view-free", "Cam_Free"),
];

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("viewer-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

fn wire_view_buttons(document: &web::Document, session: &Rc<RefCell<ViewerSession>>) {
    for (button_id, view_name) in VIEW_BUTTONS {
        let session = session.clone();
        dom::add_click_listener(document, button_id, move || {
            session.borrow_mut().request_view(view_name);
        });
    }
}

fn wire_config_buttons(document: &web::Document, session: &Rc<RefCell<ViewerSession>>) {
    for (button_id, config) in [
        ("config-shiny", ModelConfig::shiny as fn() -> ModelConfig),
        ("config-matte", ModelConfig::matte as fn() -> ModelConfig),
    ] {
        let session = session.clone();
        dom::add_click_listener(document, button_id, move || {
            let request = session.borrow_mut().apply_configuration(config());
            assets::spawn_load(session.clone(), request);
        });
    }
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id("viewer-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #viewer-canvas"))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    wire_canvas_resize(&canvas);

    let session = Rc::new(RefCell::new(ViewerSession::new(ModelConfig::shiny())));
    wire_view_buttons(&document, &session);
    wire_config_buttons(&document, &session);
    input::wire_orbit_drag(&canvas, session.clone());

    let gpu = frame::init_gpu(&canvas).await;

    // Kick off the initial configuration load
    let request = session.borrow_mut().apply_configuration(ModelConfig::shiny());
    assets::spawn_load(session.clone(), request);

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        session,
        canvas,
        gpu,
        last_instant: Instant::now(),
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
