use icons::X;
use leptos::prelude::*;
use leptos_router::hooks::use_location;
use tw_merge::tw_merge;

use crate::models::ContentKind;
use crate::state::AppContext;
use crate::util::SITE_NAME;

pub(crate) const INSTAGRAM_URL: &str = "https://instagram.com/quirki_topia";
pub(crate) const TELEGRAM_URL: &str = "https://t.me/quirkitopia";

const NAV_LINKS: [(&str, &str); 4] = [
    ("/", "Home"),
    ("/categories", "Categories"),
    ("/about", "About Us"),
    ("/contact", "Contact"),
];

/// Navbar + page body + footer. Every routed page renders inside one.
#[component]
pub fn SiteLayout(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen flex flex-col bg-background text-foreground">
            <Navbar />
            <main class="flex-1 pt-16">{children()}</main>
            <Footer />
        </div>
    }
}

#[component]
pub fn Navbar() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let session = app_state.0.session;
    let menu_open: RwSignal<bool> = RwSignal::new(false);

    let location = use_location();
    let pathname = move || location.pathname.get();

    // Signed-in admins go straight to the dashboard.
    let admin_href = move || {
        if session.get().is_some() {
            "/admin/dashboard"
        } else {
            "/admin/login"
        }
    };

    let link_class = move |href: &'static str| {
        let tone = if pathname() == href { "text-accent" } else { "text-white" };
        tw_merge!("text-sm font-medium transition-colors hover:text-accent", tone)
    };

    view! {
        <nav class="fixed top-0 inset-x-0 z-50 bg-primary/95 backdrop-blur shadow-md">
            <div class="container mx-auto px-4 h-16 flex items-center justify-between">
                <a href="/" class="text-xl font-serif font-bold text-white">
                    "🎩 " {SITE_NAME}
                </a>

                <div class="hidden md:flex items-center gap-6">
                    {NAV_LINKS
                        .into_iter()
                        .map(move |(href, label)| {
                            view! { <a href=href class=move || link_class(href)>{label}</a> }
                        })
                        .collect_view()}
                    <a
                        href=admin_href
                        class="text-sm font-bold rounded-xl bg-accent text-dark px-4 py-2 hover:bg-accent/80"
                    >
                        "Admin"
                    </a>
                </div>

                <button
                    class="md:hidden text-white text-2xl"
                    aria-label="Toggle menu"
                    on:click=move |_| menu_open.update(|o| *o = !*o)
                >
                    <Show when=move || menu_open.get() fallback=|| view! { <span>"☰"</span> }>
                        <X class="size-6" />
                    </Show>
                </button>
            </div>

            <Show when=move || menu_open.get() fallback=|| ().into_view()>
                <div class="md:hidden bg-primary border-t border-white/10 px-4 py-3 flex flex-col gap-3">
                    {NAV_LINKS
                        .into_iter()
                        .map(move |(href, label)| {
                            view! {
                                <a href=href class=move || link_class(href) on:click=move |_| menu_open.set(false)>
                                    {label}
                                </a>
                            }
                        })
                        .collect_view()}
                    <a href=admin_href class="text-sm font-bold text-accent" on:click=move |_| menu_open.set(false)>
                        "Admin"
                    </a>
                </div>
            </Show>
        </nav>
    }
}

#[component]
pub fn Footer() -> impl IntoView {
    let year = js_sys::Date::new_0().get_full_year();

    view! {
        <footer class="bg-dark text-white py-12">
            <div class="container mx-auto px-4 grid grid-cols-1 md:grid-cols-3 gap-8">
                <div>
                    <h3 class="text-xl font-serif font-bold mb-3">{SITE_NAME}</h3>
                    <p class="text-white/70 mb-4">
                        "Where every moment is a celebration of uniqueness and creativity!"
                    </p>
                    <div class="flex gap-4 text-sm">
                        <a href=INSTAGRAM_URL target="_blank" rel="noopener noreferrer" class="hover:text-accent">
                            "Instagram"
                        </a>
                        <a href=TELEGRAM_URL target="_blank" rel="noopener noreferrer" class="hover:text-accent">
                            "Telegram"
                        </a>
                    </div>
                </div>

                <div>
                    <h4 class="font-bold mb-3">"Quick Links"</h4>
                    <ul class="space-y-2 text-white/70">
                        {NAV_LINKS
                            .into_iter()
                            .map(|(href, label)| view! { <li><a href=href class="hover:text-accent">{label}</a></li> })
                            .collect_view()}
                        <li><a href="/idea-form" class="hover:text-accent">"Submit an Idea"</a></li>
                    </ul>
                </div>

                <div>
                    <h4 class="font-bold mb-3">"Categories"</h4>
                    <ul class="space-y-2 text-white/70">
                        {ContentKind::all()
                            .map(|kind| {
                                let href = format!("/categories#{}", kind.slug());
                                view! {
                                    <li>
                                        <a href=href class="hover:text-accent">
                                            {kind.emoji()} " " {kind.section_title()}
                                        </a>
                                    </li>
                                }
                            })
                            .collect_view()}
                    </ul>
                </div>
            </div>

            <div class="container mx-auto px-4 mt-10 pt-6 border-t border-white/10 text-center text-sm text-white/60">
                {format!("© {year} {SITE_NAME} | Created by NHSAST students")}
            </div>
        </footer>
    }
}

/// Full-width colored banner at the top of a page.
#[component]
pub fn PageHero(
    #[prop(into)] title: String,
    #[prop(into, optional)] subtitle: Option<String>,
    #[prop(optional)] children: Option<Children>,
) -> impl IntoView {
    view! {
        <div class="bg-primary text-white py-20 md:py-32">
            <div class="container mx-auto px-4 text-center">
                <h1 class="text-4xl md:text-5xl font-serif font-bold mb-6">{title}</h1>
                {subtitle.map(|s| view! { <p class="text-xl max-w-2xl mx-auto">{s}</p> })}
                {children.map(|c| c())}
            </div>
        </div>
    }
}

#[component]
pub fn SectionWrapper(
    #[prop(into, optional)] id: String,
    #[prop(into)] title: String,
    #[prop(into, optional)] subtitle: Option<String>,
    #[prop(into, default = "bg-white dark:bg-dark".to_string())] bg_class: String,
    #[prop(optional)] centered: bool,
    children: Children,
) -> impl IntoView {
    let section_class = tw_merge!("py-16 md:py-24 scroll-mt-32", bg_class);
    let align = if centered { "mx-auto text-center" } else { "" };
    let heading_class = tw_merge!("max-w-4xl mb-12", align);

    view! {
        <section id=id class=section_class>
            <div class="container mx-auto px-4">
                <div class=heading_class>
                    <h2 class="text-3xl md:text-4xl font-serif font-bold mb-4">{title}</h2>
                    {subtitle.map(|s| view! { <p class="text-lg text-secondary">{s}</p> })}
                </div>
                {children()}
            </div>
        </section>
    }
}
