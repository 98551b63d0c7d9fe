//! Contact form submit flow.
//!
//! The page has no backend, so submission is a stub: prevent the default
//! navigation, collect the field values, flip to `submitting`, and settle two
//! seconds later via a scheduled task. The state machine and its error
//! contract are the extension point — a real transport replaces the settle
//! scheduling, nothing else:
//!
//! ```text
//! idle → submitting → success
//!                   ↘ error(reason)
//! ```
//!
//! The `idle → submitting` edge is synchronous (observable before any time
//! passes). Each submission carries a generation token; a re-submission
//! cancels the stale settle task and bumps the generation, so a late settle
//! from an aborted attempt can never flip the state of a newer one.

use crate::dom::{Document, NodeId};
use crate::timer::{TimerId, TimerQueue};

/// Where a submission currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    Submitting,
    Success,
    Error(String),
}

/// Generation token tying a settle task to the submission that scheduled it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitToken(u64);

/// One collected form field: `(name, value)`.
pub type Field = (String, String);

#[derive(Debug)]
pub struct ContactForm {
    form: Option<NodeId>,
    state: SubmitState,
    settle_delay_ms: u64,
    generation: u64,
    pending_timer: Option<TimerId>,
    last_fields: Vec<Field>,
}

impl ContactForm {
    /// Bind to `#contact-form` if the page has one.
    pub fn init(document: &Document, settle_delay_ms: u64) -> Self {
        ContactForm {
            form: document.element_by_id("contact-form"),
            state: SubmitState::Idle,
            settle_delay_ms,
            generation: 0,
            pending_timer: None,
            last_fields: Vec::new(),
        }
    }

    pub fn state(&self) -> &SubmitState {
        &self.state
    }

    /// Field values collected by the most recent submission.
    pub fn last_fields(&self) -> &[Field] {
        &self.last_fields
    }

    /// Whether `node` is the form this component manages.
    pub fn owns(&self, node: NodeId) -> bool {
        self.form == Some(node)
    }

    /// Handle a submit event. Collects fields, enters `submitting`
    /// synchronously, and schedules the settle task built by `make_task` from
    /// this submission's token. Any stale pending settle is cancelled first.
    /// Returns `false` (nothing happened) when no form is bound.
    pub fn submit<T>(
        &mut self,
        document: &Document,
        timers: &mut TimerQueue<T>,
        make_task: impl FnOnce(SubmitToken) -> T,
    ) -> bool {
        let Some(form) = self.form else {
            return false;
        };
        if let Some(stale) = self.pending_timer.take() {
            timers.cancel(stale);
        }
        self.last_fields = collect_fields(document, form);
        self.state = SubmitState::Submitting;
        self.generation += 1;
        let token = SubmitToken(self.generation);
        self.pending_timer = Some(timers.schedule(self.settle_delay_ms, make_task(token)));
        true
    }

    /// Complete a submission. Stale tokens (from a superseded submission)
    /// return `None` and change nothing; a current token moves the machine to
    /// `success` or `error` and hands the outcome back for reporting.
    pub fn settle(
        &mut self,
        token: SubmitToken,
        outcome: Result<(), String>,
    ) -> Option<Result<(), String>> {
        if token.0 != self.generation || self.state != SubmitState::Submitting {
            return None;
        }
        self.pending_timer = None;
        self.state = match &outcome {
            Ok(()) => SubmitState::Success,
            Err(reason) => SubmitState::Error(reason.clone()),
        };
        Some(outcome)
    }

    pub fn teardown<T>(&mut self, timers: &mut TimerQueue<T>) {
        if let Some(pending) = self.pending_timer.take() {
            timers.cancel(pending);
        }
    }
}

/// Named field values from every input/textarea/select under `form`, in
/// document order.
fn collect_fields(document: &Document, form: NodeId) -> Vec<Field> {
    let mut fields = Vec::new();
    let mut stack: Vec<NodeId> = document.children(form).iter().rev().copied().collect();
    while let Some(node) = stack.pop() {
        let el = document.get(node);
        if matches!(el.tag.as_str(), "input" | "textarea" | "select") {
            if let Some(name) = el.attr("name") {
                let value = el.attr("value").unwrap_or("").to_string();
                fields.push((name.to_string(), value));
            }
        }
        stack.extend(document.children(node).iter().rev().copied());
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Element;

    #[derive(Debug, PartialEq)]
    struct Settle(SubmitToken);

    fn doc_with_form() -> Document {
        let mut doc = Document::new();
        let root = doc.root();
        let form = doc.append(root, Element::new("form").with_id("contact-form"));
        doc.append(
            form,
            Element::new("input").with_attr("name", "name").with_attr("value", "Ada"),
        );
        let row = doc.append(form, Element::new("div").with_class("form-row"));
        doc.append(
            row,
            Element::new("textarea")
                .with_attr("name", "message")
                .with_attr("value", "table for two"),
        );
        doc
    }

    #[test]
    fn submit_enters_submitting_synchronously() {
        let doc = doc_with_form();
        let mut form = ContactForm::init(&doc, 2000);
        let mut timers = TimerQueue::new();
        assert_eq!(*form.state(), SubmitState::Idle);
        assert!(form.submit(&doc, &mut timers, Settle));
        // No time has passed.
        assert_eq!(timers.now(), 0);
        assert_eq!(*form.state(), SubmitState::Submitting);
    }

    #[test]
    fn settles_to_success_after_exactly_two_seconds() {
        let doc = doc_with_form();
        let mut form = ContactForm::init(&doc, 2000);
        let mut timers = TimerQueue::new();
        form.submit(&doc, &mut timers, Settle);

        timers.advance(1999);
        assert_eq!(timers.pop_due(), None);
        assert_eq!(*form.state(), SubmitState::Submitting);

        timers.advance(1);
        let Settle(token) = timers.pop_due().expect("settle task due at 2000ms");
        assert_eq!(form.settle(token, Ok(())), Some(Ok(())));
        assert_eq!(*form.state(), SubmitState::Success);
    }

    #[test]
    fn failure_reason_lands_in_error_state() {
        let doc = doc_with_form();
        let mut form = ContactForm::init(&doc, 2000);
        let mut timers = TimerQueue::new();
        form.submit(&doc, &mut timers, Settle);
        timers.advance(2000);
        let Settle(token) = timers.pop_due().unwrap();
        form.settle(token, Err("network unreachable".to_string()));
        assert_eq!(
            *form.state(),
            SubmitState::Error("network unreachable".to_string())
        );
    }

    #[test]
    fn collects_nested_fields_in_document_order() {
        let doc = doc_with_form();
        let mut form = ContactForm::init(&doc, 2000);
        let mut timers = TimerQueue::new();
        form.submit(&doc, &mut timers, Settle);
        assert_eq!(
            form.last_fields(),
            &[
                ("name".to_string(), "Ada".to_string()),
                ("message".to_string(), "table for two".to_string()),
            ]
        );
    }

    #[test]
    fn resubmission_cancels_stale_settle() {
        let doc = doc_with_form();
        let mut form = ContactForm::init(&doc, 2000);
        let mut timers = TimerQueue::new();
        form.submit(&doc, &mut timers, Settle);

        timers.advance(1000);
        form.submit(&doc, &mut timers, Settle);

        // The first settle was cancelled: nothing fires at the old deadline.
        timers.advance(1000);
        assert_eq!(timers.pop_due(), None);
        assert_eq!(*form.state(), SubmitState::Submitting);

        // The second settles on its own 2 s schedule.
        timers.advance(1000);
        let Settle(token) = timers.pop_due().unwrap();
        assert_eq!(form.settle(token, Ok(())), Some(Ok(())));
        assert_eq!(*form.state(), SubmitState::Success);
    }

    #[test]
    fn stale_token_is_ignored() {
        let doc = doc_with_form();
        let mut form = ContactForm::init(&doc, 2000);
        let mut timers = TimerQueue::new();
        form.submit(&doc, &mut timers, Settle);
        timers.advance(500);
        // Grab the first token, then supersede it.
        let first = SubmitToken(1);
        form.submit(&doc, &mut timers, Settle);
        assert_eq!(form.settle(first, Ok(())), None);
        assert_eq!(*form.state(), SubmitState::Submitting);
    }

    #[test]
    fn no_form_means_no_submission() {
        let doc = Document::new();
        let mut form = ContactForm::init(&doc, 2000);
        let mut timers = TimerQueue::new();
        assert!(!form.submit(&doc, &mut timers, Settle));
        assert_eq!(*form.state(), SubmitState::Idle);
        assert_eq!(timers.pending(), 0);
    }
}
