//! WASM page controllers for the Email Phishing Detector
//!
//! The server renders two pages: an intake form and an analysis result. This
//! crate attaches to whichever one is loaded and applies the decisions made in
//! `phishscan-core` to the DOM.
//!
//! ## Architecture
//!
//! - `IntakeController`: file validation, character budget, submit gate
//! - `ResultAnnotator`: tooltips, legend, Show more, explanations, Copy Results
//! - All decisions live in `phishscan-core`; this crate only touches the DOM
//!
//! ## Usage (JavaScript)
//!
//! The start function boots the page by itself. Tests and embedders can attach
//! to a specific root instead; elements already wired by an earlier call are
//! skipped:
//!
//! ```javascript
//! import init, { initialize } from './pkg/phishscan_wasm.js';
//!
//! await init();
//!
//! const page = initialize(document.querySelector('#fixture'), '{"intake":{"maxChars":20000}}');
//! if (page.hasAnnotator) {
//!     console.log(page.summaryText());
//!     page.copySummary();
//! }
//! ```

pub mod annotator;
pub mod contract;
pub mod dom;
pub mod intake;

use phishscan_core::PageConfig;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event};

pub use annotator::{AnnotationReport, ResultAnnotator};
pub use intake::IntakeController;

/// Initialize the WASM module and boot the current document
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return Ok(());
    };

    if is_loading(&document) {
        let target = document.clone();
        dom::listen(&document, "DOMContentLoaded", move |_event: Event| {
            dom::report(boot(&target));
        })?;
        Ok(())
    } else {
        boot(&document)
    }
}

fn is_loading(document: &Document) -> bool {
    document.ready_state() == "loading"
}

fn boot(document: &Document) -> Result<(), JsValue> {
    let Some(body) = document.body() else {
        return Ok(());
    };
    let config = body.get_attribute(contract::CONFIG_ATTR);
    let page = initialize(&body, config)?;
    web_sys::console::log_1(
        &format!(
            "Phishscan WASM initialized (intake: {}, results: {})",
            page.has_intake(),
            page.has_annotator()
        )
        .into(),
    );
    Ok(())
}

/// Attach the page controllers to `root`.
///
/// `config_json` is an optional `PageConfig` document; defaults apply when it
/// is missing or blank. Invalid configuration is an error.
#[wasm_bindgen]
pub fn initialize(root: &Element, config_json: Option<String>) -> Result<Page, JsValue> {
    let config = PageConfig::from_optional_json(config_json.as_deref())
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    initialize_with_config(root, config)
}

/// Rust-side entry point taking an already parsed configuration
pub fn initialize_with_config(root: &Element, config: PageConfig) -> Result<Page, JsValue> {
    let intake = IntakeController::attach(root, config.intake)?;
    let annotator = ResultAnnotator::attach(root, config.annotator)?;
    let report = match &annotator {
        Some(annotator) => annotator.annotate()?,
        None => AnnotationReport::default(),
    };

    Ok(Page {
        intake,
        annotator,
        report,
    })
}

/// Handle on an initialized page
#[wasm_bindgen]
pub struct Page {
    intake: Option<IntakeController>,
    annotator: Option<ResultAnnotator>,
    report: AnnotationReport,
}

impl Page {
    pub fn intake(&self) -> Option<&IntakeController> {
        self.intake.as_ref()
    }

    pub fn annotator(&self) -> Option<&ResultAnnotator> {
        self.annotator.as_ref()
    }

    pub fn report(&self) -> &AnnotationReport {
        &self.report
    }
}

#[wasm_bindgen]
impl Page {
    #[wasm_bindgen(getter, js_name = hasIntake)]
    pub fn has_intake(&self) -> bool {
        self.intake.is_some()
    }

    #[wasm_bindgen(getter, js_name = hasAnnotator)]
    pub fn has_annotator(&self) -> bool {
        self.annotator.is_some()
    }

    /// Clipboard text for the result page, `undefined` on other pages
    #[wasm_bindgen(js_name = summaryText)]
    pub fn summary_text(&self) -> Result<Option<String>, JsValue> {
        match &self.annotator {
            Some(annotator) => Ok(Some(annotator.collect_summary()?.render())),
            None => Ok(None),
        }
    }

    /// Structured summary: `{ verdict, confidence, indicators, sections }`
    #[wasm_bindgen(js_name = summaryJson)]
    pub fn summary_json(&self) -> Result<JsValue, JsValue> {
        let Some(annotator) = &self.annotator else {
            return Ok(JsValue::UNDEFINED);
        };
        let summary = annotator.collect_summary()?;
        serde_wasm_bindgen::to_value(&summary)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Copy the summary to the clipboard without button feedback
    #[wasm_bindgen(js_name = copySummary)]
    pub fn copy_summary(&self) {
        if let Some(annotator) = &self.annotator {
            annotator.copy_summary(None);
        }
    }

    /// What the annotator installed, for diagnostics
    #[wasm_bindgen(js_name = annotationReport)]
    pub fn annotation_report(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.report)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }
}

/// Get the library version
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}


#[cfg(test)]
#[cfg(target_arch = "wasm32")]
mod wasm_tests {
    use super::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn fixture(html: &str) -> Element {
        let document = web_sys::window().unwrap().document().unwrap();
        let root = document.create_element("div").unwrap();
        root.set_inner_html(html);
        document.body().unwrap().append_child(&root).unwrap();
        root
    }

    #[wasm_bindgen_test]
    fn test_intake_page_gets_only_intake() {
        let root = fixture(
            r#"<form id="email-form"><textarea id="email_text"></textarea>
               <input type="file" id="email_file"></form>"#,
        );
        let page = initialize(&root, None).unwrap();
        assert!(page.has_intake());
        assert!(!page.has_annotator());
        assert_eq!(page.summary_text().unwrap(), None);
        root.remove();
    }

    #[wasm_bindgen_test]
    fn test_result_page_gets_annotated() {
        let root = fixture(
            r#"<div class="results"><h2>Phishing</h2>
               <div class="result-summary">91%</div>
               <div class="email-content"><span class="url-highlight">http://a.example</span></div>
               </div>"#,
        );
        let page = initialize(&root, Some(String::new())).unwrap();
        assert!(!page.has_intake());
        assert!(page.has_annotator());
        assert_eq!(page.report().legend, vec!["URL"]);

        let text = page.summary_text().unwrap().unwrap();
        assert!(text.starts_with("Email Phishing Analysis Results:\n"));
        assert!(text.contains("URLs:\n- http://a.example\n"));
        root.remove();
    }

    #[wasm_bindgen_test]
    fn test_invalid_config_is_rejected() {
        let root = fixture("<div class=\"results\"></div>");
        let result = initialize(&root, Some("{\"intake\":{\"maxChars\":0}}".to_string()));
        assert!(result.is_err());
        root.remove();
    }

    #[wasm_bindgen_test]
    fn test_second_initialize_does_not_rewire() {
        let root = fixture(
            r#"<form id="email-form"><textarea id="email_text"></textarea></form>
               <div class="results"><h2>Phishing</h2>
               <div class="email-content" style="display:block"><div style="height: 900px">body</div></div>
               <button class="explanation-toggle">?</button>
               <div class="explanation">Why</div>
               </div>"#,
        );
        let first = initialize(&root, None).unwrap();
        assert!(first.has_intake());
        assert!(first.has_annotator());

        let outer: Element = root.parent_element().unwrap();
        let second = initialize(&outer, None).unwrap();
        assert!(!second.has_intake());
        assert!(!second.has_annotator());

        assert_eq!(dom::query_all(&root, ".copy-results").unwrap().len(), 1);
        assert_eq!(dom::query_all(&root, ".toggle-content").unwrap().len(), 1);
        assert_eq!(dom::query_all(&root, ".highlight-legend").unwrap().len(), 0);
        assert_eq!(dom::query_all(&root, "#char-count").unwrap().len(), 1);

        let toggle = dom::query(&root, ".explanation-toggle").unwrap().unwrap();
        let panel = dom::query(&root, ".explanation").unwrap().unwrap();
        toggle.dyn_ref::<web_sys::HtmlElement>().unwrap().click();
        assert!(!dom::is_hidden(&panel));
        root.remove();
    }

    #[wasm_bindgen_test]
    fn test_config_reaches_controllers() {
        let root = fixture(r#"<form id="email-form"><textarea id="email_text"></textarea></form>"#);
        let page = initialize(&root, Some("{\"intake\":{\"maxChars\":20000}}".to_string())).unwrap();
        assert_eq!(page.intake().unwrap().config().max_chars, 20000);
        root.remove();
    }
}
