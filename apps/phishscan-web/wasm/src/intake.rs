//! Intake form controller
//!
//! Wires the email textarea, the file picker and the form submit event to the
//! decisions in `phishscan_core`. All state lives in one controller per page;
//! the event closures share it through an `Rc`.

use crate::contract::{
    COUNTER_CLASS, COUNTER_ID, COUNTER_SELECTOR, FILE_INPUT_SELECTOR, FORM_SELECTOR,
    LOADING_CAPTION, LOADING_OVERLAY_CLASS, READY_ATTR, TEXTAREA_SELECTOR,
};
use crate::dom;
use phishscan_core::{
    clamp_to_limit, validate_file, AcceptedFile, CharCount, CounterState, FileCandidate,
    IntakeConfig, IntakeError, IntakeMachine, IntakePhase, MessageKind, MessageLifetime,
    MessagePlacement, SubmissionDraft, SubmitOutcome, ValidationMessage,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Document, Element, Event, File, HtmlInputElement, HtmlTextAreaElement};

struct IntakeInner {
    document: Document,
    form: Option<Element>,
    textarea: Option<HtmlTextAreaElement>,
    file_input: Option<HtmlInputElement>,
    counter: Option<Element>,
    config: IntakeConfig,
    machine: RefCell<IntakeMachine>,
}

#[derive(Clone)]
pub struct IntakeController {
    inner: Rc<IntakeInner>,
}

impl IntakeController {
    /// Attach to the intake elements under `root`.
    ///
    /// Returns `Ok(None)` when the page has no intake form, or when its
    /// elements are already driven by another controller.
    pub fn attach(root: &Element, config: IntakeConfig) -> Result<Option<Self>, JsValue> {
        let document = dom::document_of(root)?;
        let textarea = dom::query(root, TEXTAREA_SELECTOR)?
            .and_then(|element| element.dyn_into::<HtmlTextAreaElement>().ok());
        let file_input = dom::query(root, FILE_INPUT_SELECTOR)?
            .and_then(|element| element.dyn_into::<HtmlInputElement>().ok());

        let form = match dom::query(root, FORM_SELECTOR)? {
            Some(form) => Some(form),
            None => match (&textarea, &file_input) {
                (Some(textarea), _) => textarea.closest("form")?,
                (None, Some(file_input)) => file_input.closest("form")?,
                (None, None) => None,
            },
        };

        if form.is_none() && textarea.is_none() && file_input.is_none() {
            return Ok(None);
        }

        let owned: Vec<&Element> = [
            form.as_ref(),
            textarea.as_ref().map(AsRef::<Element>::as_ref),
            file_input.as_ref().map(AsRef::<Element>::as_ref),
        ]
        .into_iter()
        .flatten()
        .collect();
        if !dom::claim(&owned, READY_ATTR)? {
            web_sys::console::log_1(&"Intake form already attached".into());
            return Ok(None);
        }

        let counter = match &textarea {
            Some(textarea) => Some(ensure_counter(root, &document, textarea)?),
            None => None,
        };

        let controller = Self {
            inner: Rc::new(IntakeInner {
                document,
                form,
                textarea,
                file_input,
                counter,
                config,
                machine: RefCell::new(IntakeMachine::new()),
            }),
        };
        controller.bind_events()?;
        controller.handle_text_input()?;
        Ok(Some(controller))
    }

    pub fn phase(&self) -> IntakePhase {
        self.inner.machine.borrow().phase()
    }

    pub fn config(&self) -> &IntakeConfig {
        &self.inner.config
    }

    fn bind_events(&self) -> Result<(), JsValue> {
        if let Some(file_input) = &self.inner.file_input {
            let controller = self.clone();
            let input = file_input.clone();
            dom::listen(file_input, "change", move |_event| {
                let file = input.files().and_then(|files| files.get(0));
                dom::report(controller.handle_file_selection(file));
            })?;
        }

        if let Some(textarea) = &self.inner.textarea {
            let controller = self.clone();
            dom::listen(textarea, "input", move |_event| {
                dom::report(controller.handle_text_input());
            })?;
        }

        if let Some(form) = &self.inner.form {
            let controller = self.clone();
            dom::listen(form, "submit", move |event: Event| {
                dom::report(controller.handle_submit(Some(&event)));
            })?;
        }

        Ok(())
    }

    /// Validate a newly picked file (`None` when the picker was cleared).
    ///
    /// Rejected files are removed from the input. Accepted text files are read
    /// asynchronously and replace the textarea contents when the read finishes.
    pub fn handle_file_selection(&self, file: Option<File>) -> Result<Option<AcceptedFile>, JsValue> {
        let Some(file_input) = &self.inner.file_input else {
            return Ok(None);
        };
        self.clear_file_feedback()?;

        let Some(file) = file else {
            return Ok(None);
        };
        let candidate = FileCandidate::new(file.name(), file.size() as u64, file.type_());

        match validate_file(&candidate, &self.inner.config) {
            Err(err) => {
                file_input.set_value("");
                self.show_message(&ValidationMessage::from_error(&err, &self.inner.config))?;
                Ok(None)
            }
            Ok(accepted) => {
                self.show_message(&ValidationMessage::file_name(&accepted))?;
                if accepted.read_as_text {
                    self.read_into_textarea(file);
                }
                Ok(Some(accepted))
            }
        }
    }

    fn read_into_textarea(&self, file: File) {
        let controller = self.clone();
        let promise = file.text();
        // A read superseded by a newer selection still lands; nothing cancels it.
        spawn_local(async move {
            match JsFuture::from(promise).await {
                Ok(text) => {
                    let text = text.as_string().unwrap_or_default();
                    dom::report(controller.load_text(&text));
                }
                Err(err) => {
                    let error = IntakeError::FileReadFailure(dom::describe_js_error(&err));
                    let message = ValidationMessage::from_error(&error, &controller.inner.config);
                    dom::report(controller.show_message(&message));
                }
            }
        });
    }

    /// Replace the textarea contents with text read from a file.
    /// File contents are not clamped; the counter reflects their full length.
    pub fn load_text(&self, text: &str) -> Result<(), JsValue> {
        if let Some(textarea) = &self.inner.textarea {
            textarea.set_value(text);
            self.render_counter(text)?;
        }
        Ok(())
    }

    /// Clamp the textarea to the character ceiling and refresh the counter
    pub fn handle_text_input(&self) -> Result<Option<CharCount>, JsValue> {
        let Some(textarea) = &self.inner.textarea else {
            return Ok(None);
        };

        let mut value = textarea.value();
        if let Some(clamped) = clamp_to_limit(&value, self.inner.config.max_chars) {
            textarea.set_value(&clamped);
            value = clamped;
        }
        self.render_counter(&value).map(Some)
    }

    fn render_counter(&self, text: &str) -> Result<CharCount, JsValue> {
        let count = CharCount::measure(text, &self.inner.config);
        if let Some(counter) = &self.inner.counter {
            let classes = counter.class_list();
            for state in CounterState::all() {
                classes.remove_1(state.class_name())?;
            }
            classes.add_1(count.state.class_name())?;
            counter.set_text_content(Some(&count.label()));
        }
        Ok(count)
    }

    /// Run the submission gate. A blocked submission cancels `event`.
    pub fn handle_submit(&self, event: Option<&Event>) -> Result<SubmitOutcome, JsValue> {
        let draft = self.current_draft();
        let outcome = self.inner.machine.borrow_mut().submit(&draft);

        match &outcome {
            SubmitOutcome::Blocked(err) => {
                if let Some(event) = event {
                    event.prevent_default();
                }
                self.remove_loading_overlay()?;
                self.show_message(&ValidationMessage::from_error(err, &self.inner.config))?;
            }
            SubmitOutcome::Proceed => {
                self.show_loading_overlay()?;
            }
            SubmitOutcome::InFlight => {}
        }

        Ok(outcome)
    }

    fn current_draft(&self) -> SubmissionDraft {
        let text = self
            .inner
            .textarea
            .as_ref()
            .map(|textarea| textarea.value())
            .unwrap_or_default();
        let file = self
            .inner
            .file_input
            .as_ref()
            .and_then(|input| input.files())
            .and_then(|files| files.get(0))
            .map(|file| FileCandidate::new(file.name(), file.size() as u64, file.type_()));
        SubmissionDraft::new(text, file)
    }

    fn clear_file_feedback(&self) -> Result<(), JsValue> {
        let parent = self
            .inner
            .file_input
            .as_ref()
            .and_then(|input| input.parent_element());
        if let Some(parent) = parent {
            for kind in MessageKind::FILE_FEEDBACK {
                dom::remove_children_with_class(&parent, kind.class_name())?;
            }
        }
        Ok(())
    }

    /// Show `message` at its placement, replacing the previous one of its kind.
    /// Returns the inserted node, or `None` when the page lacks the anchor.
    fn show_message(&self, message: &ValidationMessage) -> Result<Option<Element>, JsValue> {
        let placement = message.kind.placement();
        let anchor = match placement {
            MessagePlacement::AfterFileInput => {
                self.inner.file_input.clone().map(Element::from)
            }
            MessagePlacement::FormTop => self.inner.form.clone(),
        };
        let Some(anchor) = anchor else {
            return Ok(None);
        };

        let node = dom::create_element(
            &self.inner.document,
            "div",
            &message.class_list(),
            Some(&message.text),
        )?;
        if message.kind.is_error() {
            node.set_attribute("role", "alert")?;
        }
        dom::replace_or_insert(&anchor, placement, message.kind.class_name(), &node)?;

        if let MessageLifetime::ExpiresAfter(millis) = message.lifetime {
            let expiring = node.clone();
            dom::schedule(millis, move || expiring.remove());
        }

        Ok(Some(node))
    }

    fn overlay_host(&self) -> Result<Element, JsValue> {
        let document = &self.inner.document;
        document
            .body()
            .map(Element::from)
            .or_else(|| document.document_element())
            .ok_or_else(|| JsValue::from_str("No element to host the loading overlay"))
    }

    /// Overlay left behind by an earlier submit (stopped request, restored page)
    fn remove_loading_overlay(&self) -> Result<usize, JsValue> {
        dom::remove_children_with_class(&self.overlay_host()?, LOADING_OVERLAY_CLASS)
    }

    fn show_loading_overlay(&self) -> Result<Element, JsValue> {
        let document = &self.inner.document;
        let overlay = dom::create_element(document, "div", LOADING_OVERLAY_CLASS, None)?;
        overlay.set_attribute("role", "status")?;
        overlay.set_attribute("aria-live", "polite")?;
        dom::set_styles(
            &overlay,
            &[
                ("position", "fixed"),
                ("inset", "0"),
                ("display", "flex"),
                ("flex-direction", "column"),
                ("align-items", "center"),
                ("justify-content", "center"),
                ("background", "rgba(255, 255, 255, 0.85)"),
                ("z-index", "1000"),
            ],
        )?;

        let spinner = dom::create_element(document, "div", "spinner", None)?;
        let caption = dom::create_element(document, "p", "loading-text", Some(LOADING_CAPTION))?;
        overlay.append_child(&spinner)?;
        overlay.append_child(&caption)?;

        let host = self.overlay_host()?;
        dom::remove_children_with_class(&host, LOADING_OVERLAY_CLASS)?;
        host.append_child(&overlay)?;
        Ok(overlay)
    }
}

/// Use the page's counter element, or create one right after the textarea
fn ensure_counter(
    root: &Element,
    document: &Document,
    textarea: &HtmlTextAreaElement,
) -> Result<Element, JsValue> {
    if let Some(counter) = dom::query(root, COUNTER_SELECTOR)? {
        counter.class_list().add_1(COUNTER_CLASS)?;
        return Ok(counter);
    }
    let counter = dom::create_element(document, "div", COUNTER_CLASS, None)?;
    counter.set_id(COUNTER_ID);
    counter.set_attribute("aria-live", "polite")?;
    textarea.after_with_node_1(&counter)?;
    Ok(counter)
}
