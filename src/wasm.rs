//! Browser entry point.
//!
//! Looks up the page's elements once, then wires the file input and the
//! three operation buttons to the preview handler and dispatcher.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, HtmlElement, HtmlImageElement, HtmlInputElement};

use crate::config::{ClientConfig, normalize_base_url};
use crate::constants::dom_ids;
use crate::dispatcher::Dispatcher;
use crate::model::{Operation, Selection};
use crate::preview::{PreviewHandler, PreviewOutcome};
use crate::transport::FetchTransport;
use crate::view::{ImageView, Notifier};
use crate::wasm_file::{first_file, read_file};

impl ImageView for HtmlImageElement {
    fn set_source(&self, src: &str) {
        self.set_src(src);
    }
}

/// Reports errors with `window.alert`.
struct BrowserAlert;

impl Notifier for BrowserAlert {
    fn alert(&self, message: &str) {
        let shown = web_sys::window().map(|window| window.alert_with_message(message));
        if !matches!(shown, Some(Ok(()))) {
            log::error!("Could not show alert: {}", message);
        }
    }
}

/// Every element the client touches.
struct PageHandles {
    image_input: HtmlInputElement,
    preview: HtmlImageElement,
    result: HtmlImageElement,
    crop_x: HtmlInputElement,
    crop_y: HtmlInputElement,
    crop_width: HtmlInputElement,
    crop_height: HtmlInputElement,
    crop_button: HtmlElement,
    grayscale_button: HtmlElement,
    convolution_button: HtmlElement,
}

impl PageHandles {
    fn lookup(document: &Document) -> Result<Self, String> {
        Ok(Self {
            image_input: element(document, dom_ids::IMAGE_INPUT)?,
            preview: element(document, dom_ids::PREVIEW)?,
            result: element(document, dom_ids::RESULT)?,
            crop_x: element(document, dom_ids::CROP_X)?,
            crop_y: element(document, dom_ids::CROP_Y)?,
            crop_width: element(document, dom_ids::CROP_WIDTH)?,
            crop_height: element(document, dom_ids::CROP_HEIGHT)?,
            crop_button: element(document, dom_ids::CROP_BUTTON)?,
            grayscale_button: element(document, dom_ids::GRAYSCALE_BUTTON)?,
            convolution_button: element(document, dom_ids::CONVOLUTION_BUTTON)?,
        })
    }
}

fn element<T: JsCast>(document: &Document, id: &str) -> Result<T, String> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| format!("missing element #{id}"))?
        .dyn_into::<T>()
        .map_err(|_| format!("element #{id} has the wrong type"))
}

/// Which button was clicked.
#[derive(Clone, Copy)]
enum Trigger {
    Crop,
    Grayscale,
    Convolution,
}

struct WebClient {
    page: PageHandles,
    selection: RefCell<Selection>,
    preview: PreviewHandler,
    dispatcher: Dispatcher<FetchTransport>,
}

impl WebClient {
    async fn on_file_change(&self) {
        let Some(file) = first_file(&self.page.image_input) else {
            self.preview.invalidate();
            self.selection.borrow_mut().clear();
            return;
        };

        if let PreviewOutcome::Shown(file) =
            self.preview.show(read_file(file), &self.page.preview).await
        {
            self.selection.borrow_mut().select(file);
        }
    }

    async fn on_trigger(&self, trigger: Trigger) {
        // Cloned so no RefCell borrow is held across the request
        let file = self.selection.borrow().get().cloned();
        let file = file.as_ref();
        let result = &self.page.result;

        match trigger {
            Trigger::Crop => {
                let fields = [
                    self.page.crop_x.value(),
                    self.page.crop_y.value(),
                    self.page.crop_width.value(),
                    self.page.crop_height.value(),
                ];
                let [x, y, width, height] = &fields;
                let fields = [x.as_str(), y.as_str(), width.as_str(), height.as_str()];
                self.dispatcher
                    .crop_from_fields(fields, file, result, &BrowserAlert)
                    .await;
            }
            Trigger::Grayscale => {
                self.dispatcher
                    .dispatch(Operation::Grayscale, file, result, &BrowserAlert)
                    .await;
            }
            Trigger::Convolution => {
                self.dispatcher
                    .dispatch(Operation::Convolution, file, result, &BrowserAlert)
                    .await;
            }
        }
    }
}

fn on_event(target: &HtmlElement, event: &str, client: &Rc<WebClient>, trigger: Option<Trigger>) {
    let client = Rc::clone(client);
    let handler = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
        let client = Rc::clone(&client);
        wasm_bindgen_futures::spawn_local(async move {
            match trigger {
                Some(trigger) => client.on_trigger(trigger).await,
                None => client.on_file_change().await,
            }
        });
    });

    if let Err(e) = target.add_event_listener_with_callback(event, handler.as_ref().unchecked_ref())
    {
        log::error!("Failed to attach {} listener: {:?}", event, e);
    }
    handler.forget(); // Leak the closure to keep it alive
}

/// Service address: `<body data-base-url>` wins over the stored config.
fn resolve_base_url(document: &Document, config: &ClientConfig) -> String {
    let attribute = document
        .body()
        .and_then(|body| body.get_attribute("data-base-url"));

    match attribute.map(|url| normalize_base_url(&url)) {
        Some(Ok(url)) => url,
        Some(Err(e)) => {
            log::warn!("Ignoring data-base-url: {}", e);
            config.base_url.clone()
        }
        None => config.base_url.clone(),
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let config = ClientConfig::load_from_local_storage().unwrap_or_default();
    if let Err(e) = console_log::init_with_level(config.log_level.to_level()) {
        web_sys::console::warn_1(&format!("Logger already initialized: {}", e).into());
    }

    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        log::error!("No document available; client not started");
        return;
    };

    let page = match PageHandles::lookup(&document) {
        Ok(page) => page,
        Err(e) => {
            log::error!("Client not started: {}", e);
            return;
        }
    };

    let base_url = resolve_base_url(&document, &config);
    log::info!("imgproc-client ready, service at {}", base_url);

    let client = Rc::new(WebClient {
        page,
        selection: RefCell::new(Selection::new()),
        preview: PreviewHandler::new(),
        dispatcher: Dispatcher::new(base_url, FetchTransport::new()),
    });

    on_event(&client.page.image_input, "change", &client, None);
    on_event(&client.page.crop_button, "click", &client, Some(Trigger::Crop));
    on_event(
        &client.page.grayscale_button,
        "click",
        &client,
        Some(Trigger::Grayscale),
    );
    on_event(
        &client.page.convolution_button,
        "click",
        &client,
        Some(Trigger::Convolution),
    );
}
