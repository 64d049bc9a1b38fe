use std::rc::Rc;

use gloo::timers::callback::Timeout;
use yew::prelude::*;

/// How long a toast stays on screen.
const TOAST_DURATION_MS: u32 = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub kind: ToastKind,
    pub title: String,
    pub description: String,
}

pub enum ToastAction {
    Push {
        kind: ToastKind,
        title: String,
        description: String,
    },
    Dismiss(u32),
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ToastList {
    pub toasts: Vec<Toast>,
    next_id: u32,
}

impl Reducible for ToastList {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut list = (*self).clone();
        match action {
            ToastAction::Push {
                kind,
                title,
                description,
            } => {
                list.toasts.push(Toast {
                    id: list.next_id,
                    kind,
                    title,
                    description,
                });
                list.next_id += 1;
            }
            ToastAction::Dismiss(id) => list.toasts.retain(|toast| toast.id != id),
        }
        Rc::new(list)
    }
}

pub type ToastDispatcher = UseReducerDispatcher<ToastList>;

pub fn show_success_toast(toasts: &ToastDispatcher, description: impl Into<String>) {
    toasts.dispatch(ToastAction::Push {
        kind: ToastKind::Success,
        title: "Success!".to_string(),
        description: description.into(),
    });
}

pub fn show_error_toast(toasts: &ToastDispatcher, description: impl Into<String>) {
    toasts.dispatch(ToastAction::Push {
        kind: ToastKind::Error,
        title: "Something went wrong!".to_string(),
        description: description.into(),
    });
}

/// The toast dispatcher provided by the nearest [`ToastProvider`].
#[hook]
pub fn use_toast() -> Option<ToastDispatcher> {
    use_context::<ToastDispatcher>()
}

#[derive(Properties, PartialEq)]
pub struct ToastProviderProps {
    #[prop_or_default]
    pub children: Html,
}

#[function_component(ToastProvider)]
pub fn toast_provider(props: &ToastProviderProps) -> Html {
    let toasts = use_reducer(ToastList::default);
    let dispatcher = toasts.dispatcher();

    html! {
        <ContextProvider<ToastDispatcher> context={dispatcher.clone()}>
            { props.children.clone() }
            <div class="toast-viewport">
                { for toasts.toasts.iter().map(|toast| html! {
                    <ToastItem key={toast.id} toast={toast.clone()} dispatcher={dispatcher.clone()} />
                })}
            </div>
        </ContextProvider<ToastDispatcher>>
    }
}

#[derive(Properties, PartialEq)]
struct ToastItemProps {
    toast: Toast,
    dispatcher: ToastDispatcher,
}

#[function_component(ToastItem)]
fn toast_item(props: &ToastItemProps) -> Html {
    let id = props.toast.id;

    {
        let dispatcher = props.dispatcher.clone();
        use_effect_with(id, move |id| {
            let id = *id;
            let timeout = Timeout::new(TOAST_DURATION_MS, move || {
                dispatcher.dispatch(ToastAction::Dismiss(id));
            });
            move || drop(timeout)
        });
    }

    let dismiss = {
        let dispatcher = props.dispatcher.clone();
        Callback::from(move |_| dispatcher.dispatch(ToastAction::Dismiss(id)))
    };

    let class = match props.toast.kind {
        ToastKind::Success => "toast toast-success",
        ToastKind::Error => "toast toast-error",
    };

    html! {
        <div class={class} role="status" onclick={dismiss}>
            <div class="toast-title">{ &props.toast.title }</div>
            <div class="toast-description">{ &props.toast.description }</div>
        </div>
    }
}
