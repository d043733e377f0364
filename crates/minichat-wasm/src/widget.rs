use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element};

use minichat_session::{ChatBackend, ChatSession};
use minichat_types::{Message, Sender};

use crate::dom;
use crate::http::HttpBackend;
use crate::ids::BrowserIds;
use crate::markdown;
use crate::storage::LocalStorage;
use crate::utils;

const DEFAULT_CHAT_URL: &str = "/chat";
const DEFAULT_END_URL: &str = "/end-session";

const OPENING_PLACEHOLDER: &str = "Press Enter to send 'hello'";
const ONGOING_PLACEHOLDER: &str = "Type your message....";
const OPENING_PREFILL: &str = "hello";
const SESSION_ENDED_NOTICE: &str = "Session ended. Thanks for chatting!";

type Session = ChatSession<LocalStorage, BrowserIds>;

pub struct ChatWidget {
    document: Document,
    backend: Rc<HttpBackend>,
    session: Rc<RefCell<Session>>,
}

impl ChatWidget {
    /// Locate the mount node, read its endpoint configuration and
    /// resolve the session id.
    pub fn mount() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("No document"))?;

        let root = dom::get_element_by_id(&document, "minichat")?;
        let chat_url = utils::data_attr(&root, "data-chat-url", DEFAULT_CHAT_URL);
        let end_url = utils::data_attr(&root, "data-end-url", DEFAULT_END_URL);

        let mut session = ChatSession::new(LocalStorage, BrowserIds);
        session.ensure_session();

        Ok(Self {
            document,
            backend: Rc::new(HttpBackend::new(chat_url, end_url)),
            session: Rc::new(RefCell::new(session)),
        })
    }

    pub async fn start(self) -> Result<(), JsValue> {
        render_transcript(&self.document, &self.session.borrow())?;

        self.setup_send_handlers()?;
        self.setup_refresh_button()?;
        self.setup_end_button()?;

        self.prefill_first_interaction().await
    }

    fn setup_send_handlers(&self) -> Result<(), JsValue> {
        // Send button
        let send_btn = dom::get_element_by_id(&self.document, "sendButton")?;
        let document = self.document.clone();
        let session = self.session.clone();
        let backend = self.backend.clone();

        let closure = Closure::wrap(Box::new(move || {
            let document = document.clone();
            let session = session.clone();
            let backend = backend.clone();
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(e) = submit_message(document, session, backend).await {
                    log::error!("Failed to send message: {:?}", e);
                }
            });
        }) as Box<dyn FnMut()>);

        send_btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();

        // Enter key handler
        let input = dom::get_input_by_id(&self.document, "messageInput")?;
        let document = self.document.clone();
        let session = self.session.clone();
        let backend = self.backend.clone();

        let closure = Closure::wrap(Box::new(move |event: web_sys::KeyboardEvent| {
            if event.key() == "Enter" {
                event.prevent_default();
                let document = document.clone();
                let session = session.clone();
                let backend = backend.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    if let Err(e) = submit_message(document, session, backend).await {
                        log::error!("Failed to send message: {:?}", e);
                    }
                });
            }
        }) as Box<dyn FnMut(_)>);

        input.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();

        Ok(())
    }

    fn setup_refresh_button(&self) -> Result<(), JsValue> {
        let button = dom::get_element_by_id(&self.document, "refreshButton")?;
        let document = self.document.clone();
        let session = self.session.clone();

        let closure = Closure::wrap(Box::new(move || {
            session.borrow_mut().reset_session();
            if let Err(e) = on_session_reset(&document, &session) {
                log::error!("Failed to refresh session view: {:?}", e);
            }
        }) as Box<dyn FnMut()>);

        button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();

        Ok(())
    }

    fn setup_end_button(&self) -> Result<(), JsValue> {
        let button = dom::get_element_by_id(&self.document, "endButton")?;
        let document = self.document.clone();
        let session = self.session.clone();
        let backend = self.backend.clone();

        let closure = Closure::wrap(Box::new(move || {
            let document = document.clone();
            let session = session.clone();
            let backend = backend.clone();
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(e) = submit_end_session(document, session, backend).await {
                    log::error!("Failed to end session: {:?}", e);
                }
            });
        }) as Box<dyn FnMut()>);

        button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();

        Ok(())
    }

    /// Pre-fill "hello" and focus the input shortly after load, while the
    /// conversation is still just the greeting.
    async fn prefill_first_interaction(&self) -> Result<(), JsValue> {
        gloo_timers::future::TimeoutFuture::new(100).await;

        if !self.session.borrow().transcript().is_opening() {
            return Ok(());
        }

        let input = dom::get_input_by_id(&self.document, "messageInput")?;
        input.set_placeholder(OPENING_PLACEHOLDER);
        input.set_value(OPENING_PREFILL);
        let _ = input.focus();
        let end = input.value().len() as u32;
        let _ = input.set_selection_range(end, end);

        Ok(())
    }
}

async fn submit_message(
    document: Document,
    session: Rc<RefCell<Session>>,
    backend: Rc<HttpBackend>,
) -> Result<(), JsValue> {
    let input = dom::get_input_by_id(&document, "messageInput")?;
    let text = input.value();

    // Stage the send; blank input and an in-flight request are no-ops.
    let request = match session.borrow_mut().prepare_send(&text) {
        Some(request) => request,
        None => return Ok(()),
    };

    input.set_value("");
    input.set_placeholder(ONGOING_PLACEHOLDER);
    set_send_controls_enabled(&document, false)?;
    render_transcript(&document, &session.borrow())?;

    let outcome = backend.send_message(&request).await;
    session.borrow_mut().apply_send(outcome);

    set_send_controls_enabled(&document, true)?;
    render_transcript(&document, &session.borrow())?;
    let _ = input.focus();

    Ok(())
}

async fn submit_end_session(
    document: Document,
    session: Rc<RefCell<Session>>,
    backend: Rc<HttpBackend>,
) -> Result<(), JsValue> {
    let request = match session.borrow_mut().prepare_end() {
        Some(request) => request,
        None => return Ok(()),
    };

    let outcome = backend.end_session(&request).await;
    let ended = session.borrow_mut().apply_end(outcome);

    if ended {
        show_session_notice(&document, SESSION_ENDED_NOTICE)?;
        dom::get_button_by_id(&document, "endButton")?.set_disabled(true);
    }

    Ok(())
}

fn on_session_reset(document: &Document, session: &Rc<RefCell<Session>>) -> Result<(), JsValue> {
    let input = dom::get_input_by_id(document, "messageInput")?;
    input.set_value("");
    input.set_placeholder(OPENING_PLACEHOLDER);

    dom::get_button_by_id(document, "endButton")?.set_disabled(false);
    hide_session_notice(document)?;

    render_transcript(document, &session.borrow())?;
    let _ = input.focus();

    Ok(())
}

/// Re-render the whole transcript, with a typing indicator appended
/// while a send is in flight.
fn render_transcript(document: &Document, session: &Session) -> Result<(), JsValue> {
    let container = dom::get_element_by_id(document, "messagesContainer")?;
    dom::clear_element(&container);

    for message in session.transcript().messages() {
        append_message(document, &container, message)?;
    }

    if session.is_busy() {
        append_typing_indicator(document, &container)?;
    }

    dom::scroll_to_bottom(&container);

    Ok(())
}

fn append_message(document: &Document, container: &Element, message: &Message) -> Result<(), JsValue> {
    let msg_div = document.create_element("div")?;
    msg_div.set_class_name(&format!("message {}", message.sender.as_str()));

    // Bot replies may carry markdown; user text is rendered verbatim.
    let content_html = match message.sender {
        Sender::Bot => markdown::render_message_content(&message.text, true),
        Sender::User => markdown::render_message_content(&message.text, false),
    };

    let html = format!(
        r#"<div class="message-content">{}</div><div class="message-time">{}</div>"#,
        content_html,
        utils::escape_html(&message.time)
    );

    msg_div.set_inner_html(&html);
    container.append_child(&msg_div)?;

    Ok(())
}

fn append_typing_indicator(document: &Document, container: &Element) -> Result<(), JsValue> {
    let msg_div = document.create_element("div")?;
    msg_div.set_class_name("message bot typing");
    msg_div.set_inner_html(
        r#"<div class="message-content"><span class="typing-indicator"><span></span><span></span><span></span></span></div>"#,
    );
    container.append_child(&msg_div)?;

    Ok(())
}

fn set_send_controls_enabled(document: &Document, enabled: bool) -> Result<(), JsValue> {
    dom::get_input_by_id(document, "messageInput")?.set_disabled(!enabled);
    dom::get_button_by_id(document, "sendButton")?.set_disabled(!enabled);
    Ok(())
}

fn show_session_notice(document: &Document, notice: &str) -> Result<(), JsValue> {
    let element = dom::get_html_element_by_id(document, "sessionNotice")?;
    element.set_text_content(Some(notice));
    dom::show_element(&element);
    Ok(())
}

fn hide_session_notice(document: &Document) -> Result<(), JsValue> {
    let element = dom::get_html_element_by_id(document, "sessionNotice")?;
    dom::hide_element(&element);
    Ok(())
}
