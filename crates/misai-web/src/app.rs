//! Main application component

use leptos::*;
use leptos_router::*;
use crate::pages::*;
use crate::components::*;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <Router>
            <div class="app-container">
                <Nav/>
                <main>
                    <Routes>
                        <Route path="/" view=HomePage/>
                        <Route path="/testai" view=TestAiPage/>
                        <Route path="/testimage" view=TestImagePage/>
                        <Route path="/testvideo" view=TestVideoPage/>
                        <Route path="/misbot" view=MisBotPage/>
                    </Routes>
                </main>
                <Footer/>
            </div>
        </Router>
    }
}
