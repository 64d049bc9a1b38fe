mod components;
mod config;
mod mutation;
mod pages;
mod router;
mod services;
mod utils;

use yew::prelude::*;
use yew_router::BrowserRouter;

use crate::components::toast::ToastProvider;
use crate::router::{switch, Route};
use crate::services::GoogleService;

#[function_component(App)]
fn app() -> Html {
    let service = use_memo((), |_| GoogleService::from_env());

    html! {
        <BrowserRouter>
            <ContextProvider<GoogleService> context={(*service).clone()}>
                <ToastProvider>
                    <div id="app">
                        <components::header::Header />
                        <yew_router::Switch<Route> render={switch} />
                    </div>
                </ToastProvider>
            </ContextProvider<GoogleService>>
        </BrowserRouter>
    }
}

fn main() {
    // Initialize tracing
    tracing_wasm::set_as_global_default();

    tracing::info!("Starting calendar console");
    yew::Renderer::<App>::new().render();
}
