use std::cell::RefCell;
use std::rc::Rc;

use gloo_net::http::Request;
use gloo_timers::callback::Timeout;
use log::{debug, error, info};
use serde::Deserialize;
use serde_json::Value;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, FormData, HtmlButtonElement, HtmlElement, HtmlFormElement};

use crate::config::{selectors, SiteConfig};
use crate::dom;
use crate::error::{SiteError, SiteResult};

/// Reply from the form endpoint. Fields are read loosely, the way a
/// browser script would treat them: any truthy `success` counts.
#[derive(Debug, Default, Deserialize)]
pub struct SubmitResponse {
    #[serde(default)]
    pub success: Value,
    #[serde(default)]
    pub message: Value,
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

impl SubmitResponse {
    pub fn into_result(self) -> SiteResult<()> {
        if truthy(&self.success) {
            return Ok(());
        }
        let message = match self.message {
            Value::String(s) if !s.is_empty() => Some(s),
            Value::Number(n) if n.as_f64().map_or(false, |f| f != 0.0) => Some(n.to_string()),
            _ => None,
        };
        Err(SiteError::Rejected(message))
    }
}

/// What the result element shows after a submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub class: &'static str,
    pub text: String,
    pub reset_form: bool,
}

impl ResultView {
    pub fn from_outcome(outcome: &SiteResult<()>, config: &SiteConfig) -> Self {
        match outcome {
            Ok(()) => Self {
                class: "success",
                text: config.success_message.to_string(),
                reset_form: true,
            },
            Err(SiteError::Rejected(message)) => Self {
                class: "error",
                text: message
                    .clone()
                    .unwrap_or_else(|| config.rejected_message.to_string()),
                reset_form: false,
            },
            Err(_) => Self {
                class: "error",
                text: config.transport_message.to_string(),
                reset_form: false,
            },
        }
    }
}

pub fn encode_fields(fields: &[(String, String)]) -> String {
    fields
        .iter()
        .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// String-valued entries of the form. File inputs are skipped.
fn form_fields(form: &HtmlFormElement) -> SiteResult<Vec<(String, String)>> {
    let data = FormData::new_with_form(form)?;
    let Some(entries) = js_sys::try_iter(&data)? else {
        return Ok(Vec::new());
    };
    let mut fields = Vec::new();
    for entry in entries {
        let pair = js_sys::Array::from(&entry?);
        if let (Some(key), Some(value)) = (pair.get(0).as_string(), pair.get(1).as_string()) {
            fields.push((key, value));
        }
    }
    Ok(fields)
}

async fn post(form: &HtmlFormElement) -> SiteResult<()> {
    let body = encode_fields(&form_fields(form)?);
    let response = Request::post(&form.action())
        .header("Accept", "application/json")
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(body)
        .send()
        .await?;
    response.json::<SubmitResponse>().await?.into_result()
}

/// Visible state of the submit control and the result message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub submit_disabled: bool,
    pub submit_label: String,
    pub result_visible: bool,
    /// Auto-hide delay for the result message, if one should be scheduled.
    pub hide_after_ms: Option<u32>,
}

/// One submission from click to result, independent of the DOM.
#[derive(Debug)]
pub struct SubmitCycle {
    original_label: String,
}

impl SubmitCycle {
    pub fn begin(original_label: String, config: &SiteConfig) -> (Self, FormState) {
        let state = FormState {
            submit_disabled: true,
            submit_label: config.sending_label.to_string(),
            result_visible: false,
            hide_after_ms: None,
        };
        (Self { original_label }, state)
    }

    pub fn finish(self, outcome: &SiteResult<()>, config: &SiteConfig) -> (ResultView, FormState) {
        let view = ResultView::from_outcome(outcome, config);
        let state = FormState {
            submit_disabled: false,
            submit_label: self.original_label,
            result_visible: true,
            hide_after_ms: Some(config.result_hide_ms),
        };
        (view, state)
    }
}

fn set_display(element: &HtmlElement, value: &str) {
    let _ = element.style().set_property("display", value);
}

#[derive(Clone)]
struct ContactForm {
    form: HtmlFormElement,
    result: HtmlElement,
    hide_timer: Rc<RefCell<Option<Timeout>>>,
    config: SiteConfig,
}

impl ContactForm {
    fn apply(&self, button: Option<&HtmlButtonElement>, state: &FormState) {
        if let Some(button) = button {
            button.set_disabled(state.submit_disabled);
            button.set_inner_html(&state.submit_label);
        }
        set_display(&self.result, if state.result_visible { "block" } else { "none" });

        drop(self.hide_timer.borrow_mut().take());
        if let Some(delay) = state.hide_after_ms {
            let result = self.result.clone();
            let timer = Timeout::new(delay, move || set_display(&result, "none"));
            *self.hide_timer.borrow_mut() = Some(timer);
        }
    }

    async fn submit(self) {
        let button = self
            .form
            .query_selector(selectors::SUBMIT_BUTTON)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok());
        let original_label = button.as_ref().map(|b| b.inner_html()).unwrap_or_default();

        let (cycle, sending) = SubmitCycle::begin(original_label, &self.config);
        self.apply(button.as_ref(), &sending);

        let outcome = post(&self.form).await;
        match &outcome {
            Ok(()) => info!("Contact form submitted"),
            Err(err) => error!("Contact form submission failed: {}", err),
        }

        let (view, done) = cycle.finish(&outcome, &self.config);
        self.result.set_text_content(Some(&view.text));
        self.result.set_class_name(view.class);
        if view.reset_form {
            self.form.reset();
        }
        self.apply(button.as_ref(), &done);
    }
}

pub fn mount(document: &Document, config: &SiteConfig) -> SiteResult<()> {
    let (Some(form), Some(result)) = (
        dom::by_id::<HtmlFormElement>(document, selectors::CONTACT_FORM_ID),
        dom::by_id::<HtmlElement>(document, selectors::FORM_RESULT_ID),
    ) else {
        debug!("No contact form on this page");
        return Ok(());
    };

    let contact = ContactForm {
        form: form.clone(),
        result,
        hide_timer: Rc::new(RefCell::new(None)),
        config: config.clone(),
    };
    dom::listen(&form, "submit", move |event| {
        event.prevent_default();
        spawn_local(contact.clone().submit());
    })
}
