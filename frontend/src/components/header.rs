use leptos::*;
use leptos_router::A;

#[component]
pub fn Header() -> impl IntoView {
    let (mobile_nav_open, set_mobile_nav_open) = create_signal(false);

    let nav_class = move || {
        if mobile_nav_open.get() {
            "usa-nav is-visible"
        } else {
            "usa-nav"
        }
    };

    view! {
        <a class="usa-skipnav" href="#main-content">"Skip to main content"</a>
        <header class="usa-header usa-header--basic">
            <div class="usa-nav-container">
                <div class="usa-navbar">
                    <div class="usa-logo">
                        <em class="usa-logo__text">
                            <A href="/">"Hospital Price Transparency Tools"</A>
                        </em>
                    </div>
                    <button
                        type="button"
                        class="usa-menu-btn"
                        on:click=move |_| set_mobile_nav_open.update(|open| *open = !*open)
                    >
                        "Menu"
                    </button>
                </div>
                <nav class=nav_class aria-label="Primary navigation">
                    <ul class="usa-nav__primary usa-accordion">
                        <li class="usa-nav__primary-item">
                            <A href="/online-validator" class="usa-nav__link">"Online Validator"</A>
                        </li>
                        <li class="usa-nav__primary-item">
                            <A href="/filename-wizard" class="usa-nav__link">"MRF Naming Wizard"</A>
                        </li>
                        <li class="usa-nav__primary-item">
                            <A href="/txt-generator" class="usa-nav__link">"TXT File Generator"</A>
                        </li>
                    </ul>
                </nav>
            </div>
        </header>
    }
}
