//! Result page annotator
//!
//! Runs once on a server-rendered analysis result. It only reads and decorates
//! existing markup: tooltips for described highlights, the highlight legend, a
//! Show more toggle for long content, explanation toggles, indicator hover
//! tooltips, and the Copy Results button.

use crate::contract::{
    ACTION_BUTTONS_CLASS, ACTION_BUTTONS_SELECTOR, COLLAPSED_CLASS, CONFIDENCE_SELECTOR,
    CONTENT_SELECTOR, CONTENT_TOGGLE_CLASS, COPIED_LABEL, COPY_BUTTON_CLASS, COPY_LABEL,
    EXPLANATION_TOGGLE_SELECTOR, INDICATOR_SELECTOR, INDICATOR_TITLE_SELECTOR,
    INDICATOR_TOOLTIP_SELECTOR, LEGEND_CLASS, LEGEND_ITEM_CLASS, READY_ATTR, RESULTS_SELECTOR,
    TOOLTIP_CLASS, VERDICT_SELECTOR,
};
use crate::dom;
use phishscan_core::highlight::DESCRIPTION_ATTR;
use phishscan_core::toggles::needs_collapse;
use phishscan_core::{
    AnnotatorConfig, Disclosure, HighlightCategory, HighlightMarker, Legend, ResultSummary,
};
use serde::Serialize;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Document, Element, Event};

/// What the annotator found and installed on the page
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationReport {
    pub tooltips: usize,
    pub legend: Vec<String>,
    pub collapsible: bool,
    pub explanation_toggles: usize,
    pub indicator_tooltips: usize,
}

struct AnnotatorInner {
    document: Document,
    root: Element,
    results: Element,
    config: AnnotatorConfig,
}

#[derive(Clone)]
pub struct ResultAnnotator {
    inner: Rc<AnnotatorInner>,
}

impl ResultAnnotator {
    /// Attach to the results container under `root`.
    ///
    /// Returns `Ok(None)` when the page is not a result page, or when the
    /// results were already annotated.
    pub fn attach(root: &Element, config: AnnotatorConfig) -> Result<Option<Self>, JsValue> {
        let Some(results) = dom::query(root, RESULTS_SELECTOR)? else {
            return Ok(None);
        };
        if !dom::claim(&[&results], READY_ATTR)? {
            web_sys::console::log_1(&"Results already annotated".into());
            return Ok(None);
        }
        Ok(Some(Self {
            inner: Rc::new(AnnotatorInner {
                document: dom::document_of(root)?,
                root: root.clone(),
                results,
                config,
            }),
        }))
    }

    /// Run every decoration once
    pub fn annotate(&self) -> Result<AnnotationReport, JsValue> {
        let tooltips = self.attach_tooltips()?;
        let legend = self.build_legend()?;
        let collapsible = self.install_collapse()?;
        self.install_copy_button()?;
        let explanation_toggles = self.install_explanation_toggles()?;
        let indicator_tooltips = self.install_indicator_hover()?;

        Ok(AnnotationReport {
            tooltips,
            legend: legend.labels().into_iter().map(String::from).collect(),
            collapsible,
            explanation_toggles,
            indicator_tooltips,
        })
    }

    /// Give every described highlight a tooltip child. Returns the number added.
    pub fn attach_tooltips(&self) -> Result<usize, JsValue> {
        let tooltip_selector = format!(".{}", TOOLTIP_CLASS);
        let mut attached = 0;

        for category in HighlightCategory::CATALOGUE {
            for element in dom::query_all(&self.inner.root, &category.selector())? {
                let marker = read_marker(category, &element)?;
                let Some(description) = marker.description else {
                    continue;
                };
                // An element may carry two category classes
                if dom::query(&element, &tooltip_selector)?.is_some() {
                    continue;
                }
                let tooltip = dom::create_element(
                    &self.inner.document,
                    "span",
                    TOOLTIP_CLASS,
                    Some(&description),
                )?;
                element.append_child(&tooltip)?;
                attached += 1;
            }
        }

        Ok(attached)
    }

    /// Insert the legend right before the content block
    pub fn build_legend(&self) -> Result<Legend, JsValue> {
        let mut failure = None;
        let legend = Legend::build(|category| {
            match dom::query(&self.inner.root, &category.selector()) {
                Ok(found) => found.is_some(),
                Err(err) => {
                    failure.get_or_insert(err);
                    false
                }
            }
        });
        if let Some(err) = failure {
            return Err(err);
        }

        for stale in dom::query_all(&self.inner.root, &format!(".{}", LEGEND_CLASS))? {
            stale.remove();
        }
        if legend.is_empty() {
            return Ok(legend);
        }
        let Some(content) = dom::query(&self.inner.root, CONTENT_SELECTOR)? else {
            return Ok(legend);
        };

        let document = &self.inner.document;
        let container = dom::create_element(document, "div", LEGEND_CLASS, None)?;
        for entry in legend.entries() {
            let item = dom::create_element(document, "div", LEGEND_ITEM_CLASS, None)?;
            let swatch = dom::create_element(document, "span", &entry.swatch_class, None)?;
            let label = dom::create_element(document, "span", "legend-label", Some(entry.label))?;
            item.append_child(&swatch)?;
            item.append_child(&label)?;
            container.append_child(&item)?;
        }
        content.before_with_node_1(&container)?;

        Ok(legend)
    }

    /// Clamp tall content and add a Show more / Show less toggle after it.
    /// Returns whether the content was tall enough to need one.
    pub fn install_collapse(&self) -> Result<bool, JsValue> {
        let Some(content) = dom::query(&self.inner.root, CONTENT_SELECTOR)? else {
            return Ok(false);
        };
        let threshold = self.inner.config.collapse_threshold;
        if !needs_collapse(f64::from(content.scroll_height()), threshold) {
            return Ok(false);
        }

        let mut state = Disclosure::content();
        apply_clamp(&content, state.is_open(), threshold)?;

        let button = dom::create_button(&self.inner.document, CONTENT_TOGGLE_CLASS, state.label())?;
        content.after_with_node_1(&button)?;

        let label_target = button.clone();
        dom::listen(&button, "click", move |_event| {
            let open = state.toggle();
            dom::report(apply_clamp(&content, open, threshold));
            label_target.set_text_content(Some(state.label()));
        })?;

        Ok(true)
    }

    /// Add the Copy Results button to the action-button container
    pub fn install_copy_button(&self) -> Result<Element, JsValue> {
        let container = match dom::query(&self.inner.root, ACTION_BUTTONS_SELECTOR)? {
            Some(container) => container,
            None => {
                let container =
                    dom::create_element(&self.inner.document, "div", ACTION_BUTTONS_CLASS, None)?;
                self.inner.results.append_child(&container)?;
                container
            }
        };

        let button = dom::create_button(&self.inner.document, COPY_BUTTON_CLASS, COPY_LABEL)?;
        container.append_child(&button)?;

        let annotator = self.clone();
        let trigger = button.clone();
        dom::listen(&button, "click", move |_event| {
            annotator.copy_summary(Some(trigger.clone()));
        })?;

        Ok(button)
    }

    /// Make each explanation toggle show/hide the element right after it
    pub fn install_explanation_toggles(&self) -> Result<usize, JsValue> {
        let mut installed = 0;

        for toggle in dom::query_all(&self.inner.root, EXPLANATION_TOGGLE_SELECTOR)? {
            let Some(panel) = toggle.next_element_sibling() else {
                continue;
            };
            let mut state = Disclosure::explanation();
            dom::set_visible(&panel, state.is_open())?;
            toggle.set_text_content(Some(state.label()));

            let label_target = toggle.clone();
            dom::listen(&toggle, "click", move |event: Event| {
                event.prevent_default();
                let open = state.toggle();
                dom::report(dom::set_visible(&panel, open));
                label_target.set_text_content(Some(state.label()));
            })?;
            installed += 1;
        }

        Ok(installed)
    }

    /// Show an indicator's tooltip while the pointer is over the indicator
    pub fn install_indicator_hover(&self) -> Result<usize, JsValue> {
        let mut installed = 0;

        for indicator in dom::query_all(&self.inner.results, INDICATOR_SELECTOR)? {
            let Some(tooltip) = dom::query(&indicator, INDICATOR_TOOLTIP_SELECTOR)? else {
                continue;
            };
            dom::set_visible(&tooltip, false)?;

            let shown = tooltip.clone();
            dom::listen(&indicator, "mouseenter", move |_event| {
                dom::report(dom::set_visible(&shown, true));
            })?;
            dom::listen(&indicator, "mouseleave", move |_event| {
                dom::report(dom::set_visible(&tooltip, false));
            })?;
            installed += 1;
        }

        Ok(installed)
    }

    /// Every highlight on the page, grouped by category in catalogue order
    pub fn collect_markers(&self) -> Result<Vec<HighlightMarker>, JsValue> {
        let mut markers = Vec::new();
        for category in HighlightCategory::CATALOGUE {
            for element in dom::query_all(&self.inner.root, &category.selector())? {
                markers.push(read_marker(category, &element)?);
            }
        }
        Ok(markers)
    }

    /// Read the verdict, confidence, indicators and highlights off the page
    pub fn collect_summary(&self) -> Result<ResultSummary, JsValue> {
        let results = &self.inner.results;
        let verdict = dom::text_of(dom::query(results, VERDICT_SELECTOR)?);
        let confidence = dom::text_of(dom::query(results, CONFIDENCE_SELECTOR)?);

        let mut indicators = Vec::new();
        for indicator in dom::query_all(results, INDICATOR_SELECTOR)? {
            if let Some(title) = dom::query(&indicator, INDICATOR_TITLE_SELECTOR)? {
                indicators.push(dom::text_of(Some(title)));
            }
        }

        let markers = self.collect_markers()?;
        Ok(ResultSummary::new(verdict, confidence, indicators).with_markers(&markers))
    }

    /// Write the summary to the clipboard. On success `trigger` shows "Copied!"
    /// for a moment; failures only reach the console.
    pub fn copy_summary(&self, trigger: Option<Element>) {
        let text = match self.collect_summary() {
            Ok(summary) => summary.render(),
            Err(err) => {
                dom::report::<()>(Err(err));
                return;
            }
        };
        let Some(window) = web_sys::window() else {
            return;
        };
        let clipboard = window.navigator().clipboard();
        if clipboard.is_undefined() {
            web_sys::console::log_1(&"Clipboard API not available".into());
            return;
        }

        let promise = clipboard.write_text(&text);
        let feedback_ms = self.inner.config.copy_feedback_ms;
        spawn_local(async move {
            match JsFuture::from(promise).await {
                Ok(_) => {
                    if let Some(trigger) = trigger {
                        show_copied(trigger, feedback_ms);
                    }
                }
                Err(err) => {
                    web_sys::console::log_2(&"Clipboard write failed:".into(), &err);
                }
            }
        });
    }
}

fn show_copied(button: Element, feedback_ms: u32) {
    button.set_text_content(Some(COPIED_LABEL));
    dom::schedule(feedback_ms, move || {
        button.set_text_content(Some(COPY_LABEL));
    });
}

fn apply_clamp(content: &Element, open: bool, threshold: f64) -> Result<(), JsValue> {
    let classes = content.class_list();
    if open {
        classes.remove_1(COLLAPSED_CLASS)?;
        dom::clear_styles(content, &["max-height", "overflow"])
    } else {
        classes.add_1(COLLAPSED_CLASS)?;
        let max_height = format!("{}px", threshold);
        dom::set_styles(
            content,
            &[("max-height", max_height.as_str()), ("overflow", "hidden")],
        )
    }
}

fn read_marker(category: HighlightCategory, element: &Element) -> Result<HighlightMarker, JsValue> {
    let marker = HighlightMarker::new(category, text_without_tooltips(element)?);
    Ok(match element.get_attribute(DESCRIPTION_ATTR) {
        Some(description) => marker.with_description(description),
        None => marker,
    })
}

/// Text of a highlight, leaving out any tooltip we injected into it
fn text_without_tooltips(element: &Element) -> Result<String, JsValue> {
    let copy = element
        .clone_node_with_deep(true)?
        .dyn_into::<Element>()
        .map_err(JsValue::from)?;
    for tooltip in dom::query_all(&copy, &format!(".{}", TOOLTIP_CLASS))? {
        tooltip.remove();
    }
    Ok(copy.text_content().unwrap_or_default())
}

#[cfg(test)]
#[cfg(target_arch = "wasm32")]
mod wasm_tests {
    use super::*;
    use gloo_timers::future::TimeoutFuture;
    use wasm_bindgen_test::*;
    use web_sys::HtmlElement;

    wasm_bindgen_test_configure!(run_in_browser);

    const RESULT_HTML: &str = r#"
        <div class="results">
            <h2>Phishing</h2>
            <div class="result-summary">87.5%</div>
            <div class="indicator">
                <span class="indicator-title">Contains 2 URLs</span>
                <div class="indicator-tooltip">Links hidden behind text</div>
            </div>
            <div class="indicator">
                <span class="indicator-title">Uses urgent language</span>
            </div>
            <div class="email-content">
                Please <span class="urgent-language" data-description="Pressure to act fast">act now</span>
                and visit <span class="url-highlight">http://example.com</span>
                or <span class="url-highlight" data-description="">www.example.org</span>.
            </div>
            <button class="explanation-toggle">?</button>
            <div class="explanation">Why this matters</div>
        </div>
    "#;

    fn fixture(html: &str) -> Element {
        let document = web_sys::window().unwrap().document().unwrap();
        let root = document.create_element("div").unwrap();
        root.set_inner_html(html);
        document.body().unwrap().append_child(&root).unwrap();
        root
    }

    fn annotator(root: &Element) -> ResultAnnotator {
        ResultAnnotator::attach(root, AnnotatorConfig::default())
            .unwrap()
            .unwrap()
    }

    fn click(element: &Element) {
        element.dyn_ref::<HtmlElement>().unwrap().click();
    }

    #[wasm_bindgen_test]
    fn test_attach_ignores_non_result_pages() {
        let root = fixture("<form id=\"email-form\"></form>");
        let annotator = ResultAnnotator::attach(&root, AnnotatorConfig::default()).unwrap();
        assert!(annotator.is_none());
        root.remove();
    }

    #[wasm_bindgen_test]
    fn test_legend_lists_present_categories_in_catalogue_order() {
        let root = fixture(RESULT_HTML);
        let legend = annotator(&root).build_legend().unwrap();
        assert_eq!(legend.labels(), vec!["URL", "Urgent Language"]);

        let container = dom::query(&root, ".highlight-legend").unwrap().unwrap();
        let next = container.next_element_sibling().unwrap();
        assert!(next.class_list().contains("email-content"));
        assert_eq!(dom::query_all(&container, ".legend-item").unwrap().len(), 2);
        root.remove();
    }

    #[wasm_bindgen_test]
    fn test_two_urls_only_gives_single_url_entry() {
        let root = fixture(
            r#"<div class="results"><div class="email-content">
                <span class="url-highlight">http://a.example</span>
                <span class="url-highlight">http://b.example</span>
            </div></div>"#,
        );
        let legend = annotator(&root).build_legend().unwrap();
        assert_eq!(legend.labels(), vec!["URL"]);
        root.remove();
    }

    #[wasm_bindgen_test]
    fn test_tooltips_only_for_described_markers() {
        let root = fixture(RESULT_HTML);
        let attached = annotator(&root).attach_tooltips().unwrap();
        assert_eq!(attached, 1);

        let tooltip = dom::query(&root, ".urgent-language .highlight-tooltip")
            .unwrap()
            .unwrap();
        assert_eq!(tooltip.text_content().unwrap(), "Pressure to act fast");
        root.remove();
    }

    #[wasm_bindgen_test]
    fn test_summary_excludes_tooltip_text() {
        let root = fixture(RESULT_HTML);
        let annotator = annotator(&root);
        annotator.attach_tooltips().unwrap();

        let text = annotator.collect_summary().unwrap().render();
        let expected = "Email Phishing Analysis Results:\n\
                        ===============================\n\
                        Verdict: Phishing\n\
                        Confidence: 87.5%\n\
                        \n\
                        Risk Indicators:\n\
                        - Contains 2 URLs\n\
                        - Uses urgent language\n\
                        \n\
                        URLs:\n\
                        - http://example.com\n\
                        - www.example.org\n\
                        \n\
                        Urgent Language:\n\
                        - act now\n\
                        \n\
                        Analyzed by Email Phishing Detector";
        assert_eq!(text, expected);
        root.remove();
    }

    #[wasm_bindgen_test]
    fn test_short_content_gets_no_toggle() {
        let root = fixture(RESULT_HTML);
        assert!(!annotator(&root).install_collapse().unwrap());
        assert!(dom::query(&root, ".toggle-content").unwrap().is_none());
        root.remove();
    }

    #[wasm_bindgen_test]
    fn test_tall_content_is_clamped_and_toggles() {
        let root = fixture(
            r#"<div class="results"><div class="email-content" style="display:block">
                <div style="height: 900px">long body</div>
            </div></div>"#,
        );
        assert!(annotator(&root).install_collapse().unwrap());

        let content = dom::query(&root, ".email-content").unwrap().unwrap();
        let toggle = dom::query(&root, ".toggle-content").unwrap().unwrap();
        assert!(content.class_list().contains("collapsed"));
        assert_eq!(toggle.text_content().unwrap(), "Show more");

        click(&toggle);
        assert!(!content.class_list().contains("collapsed"));
        assert_eq!(toggle.text_content().unwrap(), "Show less");

        click(&toggle);
        assert!(content.class_list().contains("collapsed"));
        assert_eq!(toggle.text_content().unwrap(), "Show more");
        root.remove();
    }

    #[wasm_bindgen_test]
    fn test_explanation_toggle_flips_next_sibling() {
        let root = fixture(RESULT_HTML);
        assert_eq!(annotator(&root).install_explanation_toggles().unwrap(), 1);

        let toggle = dom::query(&root, ".explanation-toggle").unwrap().unwrap();
        let panel = dom::query(&root, ".explanation").unwrap().unwrap();
        assert!(dom::is_hidden(&panel));
        assert_eq!(toggle.text_content().unwrap(), "Show explanation");

        click(&toggle);
        assert!(!dom::is_hidden(&panel));
        assert_eq!(toggle.text_content().unwrap(), "Hide explanation");
        root.remove();
    }

    #[wasm_bindgen_test]
    fn test_indicator_hover_shows_tooltip() {
        let root = fixture(RESULT_HTML);
        assert_eq!(annotator(&root).install_indicator_hover().unwrap(), 1);

        let indicator = dom::query(&root, ".indicator").unwrap().unwrap();
        let tooltip = dom::query(&indicator, ".indicator-tooltip").unwrap().unwrap();
        assert!(dom::is_hidden(&tooltip));

        indicator
            .dispatch_event(&Event::new("mouseenter").unwrap())
            .unwrap();
        assert!(!dom::is_hidden(&tooltip));

        indicator
            .dispatch_event(&Event::new("mouseleave").unwrap())
            .unwrap();
        assert!(dom::is_hidden(&tooltip));
        root.remove();
    }

    #[wasm_bindgen_test]
    fn test_copy_button_reuses_action_container() {
        let root = fixture(
            r#"<div class="results"><h2>Legitimate</h2>
                <div class="action-buttons"><a href="/">Analyze another</a></div>
            </div>"#,
        );
        annotator(&root).install_copy_button().unwrap();
        let containers = dom::query_all(&root, ".action-buttons").unwrap();
        assert_eq!(containers.len(), 1);
        let button = dom::query(&containers[0], ".copy-results").unwrap().unwrap();
        assert_eq!(button.text_content().unwrap(), "Copy Results");
        root.remove();
    }

    #[wasm_bindgen_test]
    async fn test_copied_label_reverts() {
        let root = fixture(RESULT_HTML);
        let button = annotator(&root).install_copy_button().unwrap();

        show_copied(button.clone(), 20);
        assert_eq!(button.text_content().unwrap(), "Copied!");

        TimeoutFuture::new(60).await;
        assert_eq!(button.text_content().unwrap(), "Copy Results");
        root.remove();
    }

    #[wasm_bindgen_test]
    fn test_annotate_reports_everything() {
        let root = fixture(RESULT_HTML);
        let report = annotator(&root).annotate().unwrap();
        assert_eq!(report.tooltips, 1);
        assert_eq!(report.legend, vec!["URL", "Urgent Language"]);
        assert!(!report.collapsible);
        assert_eq!(report.explanation_toggles, 1);
        assert_eq!(report.indicator_tooltips, 1);
        root.remove();
    }
}
