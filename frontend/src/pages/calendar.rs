use std::cell::RefCell;
use std::rc::Rc;

use futures::future::LocalBoxFuture;
use shared::api::{EventsResult, Message};
use web_sys::HtmlTextAreaElement;
use yew::prelude::*;

use crate::components::toast::use_toast;
use crate::mutation::Mutation;
use crate::services::GoogleService;
use crate::utils::{LogNotifier, Notifier, ToastNotifier};

pub const CREDENTIALS_SAVED: &str = "Credentials saved";

/// Page state: the credentials text and one mutation per button.
///
/// The two mutations are independent; either can be pending while the other
/// runs, and neither touches the credentials text.
pub struct CalendarController {
    credentials: Rc<RefCell<String>>,
    save: Mutation<String, Message>,
    events: Mutation<(), EventsResult>,
    on_change: Rc<dyn Fn()>,
}

impl CalendarController {
    pub fn new(
        service: GoogleService,
        notifier: Rc<dyn Notifier>,
        on_change: impl Fn() + 'static,
    ) -> Self {
        let on_change: Rc<dyn Fn()> = Rc::new(on_change);

        let save = {
            let service = service.clone();
            let success = notifier.clone();
            let failure = notifier.clone();
            let changed = on_change.clone();
            Mutation::new(move |credentials: String| service.save_credentials(credentials))
                .on_success(move |_: &Message| success.success(CREDENTIALS_SAVED))
                .on_error(move |err| failure.error(err))
                .on_change(move || changed())
        };

        let events = {
            let failure = notifier;
            let changed = on_change.clone();
            Mutation::new(move |_: ()| service.get_events_next_hour())
                .on_error(move |err| failure.error(err))
                .on_change(move || changed())
        };

        Self {
            credentials: Rc::new(RefCell::new(String::new())),
            save,
            events,
            on_change,
        }
    }

    pub fn credentials(&self) -> String {
        self.credentials.borrow().clone()
    }

    pub fn set_credentials(&self, value: impl Into<String>) {
        *self.credentials.borrow_mut() = value.into();
        (self.on_change)();
    }

    /// Posts the current text as-is, even when empty.
    pub fn save_credentials(&self) -> LocalBoxFuture<'static, ()> {
        self.save.mutate(self.credentials())
    }

    pub fn load_events(&self) -> LocalBoxFuture<'static, ()> {
        self.events.mutate(())
    }

    pub fn is_saving(&self) -> bool {
        self.save.is_pending()
    }

    pub fn is_loading_events(&self) -> bool {
        self.events.is_pending()
    }

    /// Last loaded events as 2-space indented JSON.
    pub fn events_dump(&self) -> Option<String> {
        self.events
            .data()
            .filter(|events| !events.is_null())
            .and_then(|events| serde_json::to_string_pretty(&events).ok())
    }

    /// Stops both mutations; nothing changes or re-renders afterwards.
    pub fn dispose(&self) {
        self.save.dispose();
        self.events.dispose();
    }
}

#[function_component(CalendarPage)]
pub fn calendar_page() -> Html {
    let service = use_context::<GoogleService>().unwrap_or_else(GoogleService::from_env);
    let toasts = use_toast();
    let update = use_force_update();

    let controller = use_memo((), move |_| {
        let notifier: Rc<dyn Notifier> = match toasts {
            Some(toasts) => Rc::new(ToastNotifier::new(toasts)),
            None => Rc::new(LogNotifier),
        };
        CalendarController::new(service, notifier, move || update.force_update())
    });

    {
        let controller = controller.clone();
        use_effect_with((), move |_| move || controller.dispose());
    }

    let on_input = {
        let controller = controller.clone();
        Callback::from(move |e: InputEvent| {
            let textarea: HtmlTextAreaElement = e.target_unchecked_into();
            controller.set_credentials(textarea.value());
        })
    };

    let on_save = {
        let controller = controller.clone();
        Callback::from(move |_: MouseEvent| {
            wasm_bindgen_futures::spawn_local(controller.save_credentials());
        })
    };

    let on_load = {
        let controller = controller.clone();
        Callback::from(move |_: MouseEvent| {
            wasm_bindgen_futures::spawn_local(controller.load_events());
        })
    };

    let saving = controller.is_saving();
    let loading = controller.is_loading_events();

    html! {
        <div class="container">
            <h2>{ "Google Calendar" }</h2>
            <div class="calendar-form">
                <label class="field">
                    <span class="field-label">{ "Credentials JSON" }</span>
                    <textarea
                        rows="6"
                        value={controller.credentials()}
                        oninput={on_input}
                    />
                </label>
                <button class="btn btn-primary" onclick={on_save} disabled={saving}>
                    if saving {
                        <span class="spinner"></span>
                    }
                    { "Save Credentials" }
                </button>
                <button class="btn btn-primary" onclick={on_load} disabled={loading}>
                    if loading {
                        <span class="spinner"></span>
                    }
                    { "Load Events (Next Hour)" }
                </button>
                if let Some(dump) = controller.events_dump() {
                    <pre class="events-dump">{ dump }</pre>
                }
            </div>
        </div>
    }
}
