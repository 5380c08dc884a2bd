//! Home Screen Management Page
//!
//! Admin editor for storefront hero slides and product categories.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, ApiClient};
use crate::components::DeleteConfirmButton;
use crate::context::{use_app_context, NoticeKind};
use crate::models::{Category, HeroSlide};
use crate::validation;

#[derive(Debug, Clone, Default, PartialEq)]
struct SlideForm {
    title: String,
    subtitle: String,
    image_url: String,
    link: String,
    position: String,
    active: bool,
}

impl SlideForm {
    fn blank(next_position: i32) -> Self {
        Self { position: next_position.to_string(), active: true, ..Default::default() }
    }

    fn from_slide(s: &HeroSlide) -> Self {
        Self {
            title: s.title.clone(),
            subtitle: s.subtitle.clone(),
            image_url: s.image_url.clone(),
            link: s.link.clone().unwrap_or_default(),
            position: s.position.to_string(),
            active: s.active,
        }
    }

    fn to_slide(&self, id: Option<String>) -> Result<HeroSlide, String> {
        validation::required("Title", &self.title)?;
        validation::required("Image URL", &self.image_url)?;
        let image_url = self.image_url.trim();
        let absolute = image_url.starts_with("http://") || image_url.starts_with("https://");
        if !(absolute || image_url.starts_with('/')) {
            return Err("Image URL must be absolute (http/https) or site-relative".to_string());
        }
        let position = match self.position.trim() {
            "" => 0,
            value => value
                .parse::<i32>()
                .map_err(|_| "Position must be a whole number".to_string())?,
        };
        let link = self.link.trim();
        Ok(HeroSlide {
            id: id.unwrap_or_default(),
            title: self.title.trim().to_string(),
            subtitle: self.subtitle.trim().to_string(),
            image_url: image_url.to_string(),
            link: (!link.is_empty()).then(|| link.to_string()),
            position,
            active: self.active,
        })
    }
}

fn next_position(slides: &[HeroSlide]) -> i32 {
    slides.iter().map(|s| s.position).max().map_or(0, |p| p + 1)
}

#[component]
pub fn HomeScreenPage() -> impl IntoView {
    let ctx = use_app_context();
    let client = expect_context::<ApiClient>();

    let (slides, set_slides) = signal(Vec::<HeroSlide>::new());
    let (categories, set_categories) = signal(Vec::<Category>::new());
    let (form, set_form) = signal(SlideForm::blank(0));
    let (editing, set_editing) = signal::<Option<String>>(None);
    let (form_error, set_form_error) = signal::<Option<String>>(None);
    let (new_category, set_new_category) = signal(String::new());

    let load_client = client.clone();
    Effect::new(move |_| {
        let client = load_client.clone();
        spawn_local(async move {
            match api::list_hero_slides(&client).await {
                Ok(loaded) => {
                    set_form.set(SlideForm::blank(next_position(&loaded)));
                    set_slides.set(loaded);
                }
                Err(e) => ctx.report_error("Loading hero slides", &e),
            }
            match api::list_categories(&client).await {
                Ok(loaded) => set_categories.set(loaded),
                Err(e) => ctx.report_error("Loading categories", &e),
            }
        });
    });

    let reset_form = move || {
        set_form.set(SlideForm::blank(slides.with_untracked(|s| next_position(s))));
        set_editing.set(None);
        set_form_error.set(None);
    };

    let save_client = client.clone();
    let save_slide = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let id = editing.get();
        let slide = match form.with(|f| f.to_slide(id.clone())) {
            Ok(slide) => slide,
            Err(e) => {
                set_form_error.set(Some(e));
                return;
            }
        };
        let client = save_client.clone();
        spawn_local(async move {
            let result = match id {
                Some(_) => api::update_hero_slide(&client, &slide).await,
                None => api::create_hero_slide(&client, &slide).await,
            };
            match result {
                Ok(saved) => {
                    ctx.notify(NoticeKind::Success, format!("Saved slide \"{}\"", saved.title));
                    set_slides.update(|list| {
                        match list.iter_mut().find(|s| s.id == saved.id) {
                            Some(existing) => *existing = saved,
                            None => list.push(saved),
                        }
                        list.sort_by_key(|s| s.position);
                    });
                    reset_form();
                }
                Err(e) => ctx.report_error("Saving hero slide", &e),
            }
        });
    };

    let delete_slide_client = client.clone();
    let delete_slide = move |id: String| {
        let client = delete_slide_client.clone();
        spawn_local(async move {
            match api::delete_hero_slide(&client, &id).await {
                Ok(()) => {
                    set_slides.update(|list| list.retain(|s| s.id != id));
                    ctx.notify(NoticeKind::Success, "Slide deleted");
                }
                Err(e) => ctx.report_error("Deleting hero slide", &e),
            }
        });
    };

    let toggle_client = client.clone();
    let toggle_active = move |slide: HeroSlide| {
        let client = toggle_client.clone();
        let updated = HeroSlide { active: !slide.active, ..slide };
        spawn_local(async move {
            match api::update_hero_slide(&client, &updated).await {
                Ok(saved) => set_slides.update(|list| {
                    if let Some(existing) = list.iter_mut().find(|s| s.id == saved.id) {
                        *existing = saved;
                    }
                }),
                Err(e) => ctx.report_error("Updating hero slide", &e),
            }
        });
    };

    let category_client = client.clone();
    let add_category = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let name = new_category.get().trim().to_string();
        if let Err(e) = validation::required("Category name", &name) {
            ctx.notify(NoticeKind::Warning, e);
            return;
        }
        if categories.with(|list| list.iter().any(|c| c.name.eq_ignore_ascii_case(&name))) {
            ctx.notify(NoticeKind::Warning, format!("Category {} already exists", name));
            return;
        }
        let client = category_client.clone();
        spawn_local(async move {
            let category = Category { name, ..Default::default() };
            match api::create_category(&client, &category).await {
                Ok(saved) => {
                    set_categories.update(|list| list.push(saved));
                    set_new_category.set(String::new());
                }
                Err(e) => ctx.report_error("Creating category", &e),
            }
        });
    };

    let delete_category_client = client.clone();
    let delete_category = move |id: String| {
        let client = delete_category_client.clone();
        spawn_local(async move {
            match api::delete_category(&client, &id).await {
                Ok(()) => set_categories.update(|list| list.retain(|c| c.id != id)),
                Err(e) => ctx.report_error("Deleting category", &e),
            }
        });
    };

    let field = move |label: &'static str,
                      get: fn(&SlideForm) -> String,
                      set: fn(&mut SlideForm, String)| {
        view! {
            <label>
                {label}
                <input
                    type="text"
                    prop:value=move || form.with(get)
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        set_form.update(|f| set(f, value));
                    }
                />
            </label>
        }
    };

    view! {
        <div class="page home-screen-page">
            <h1>"Home Screen"</h1>

            <Show
                when=move || ctx.is_admin()
                fallback=|| {
                    view! {
                        <div class="card">
                            <p>"Only administrators can manage the home screen."</p>
                        </div>
                    }
                }
            >
                <form class="card slide-form" on:submit=save_slide.clone()>
                    <h2 class="card-title">
                        {move || if editing.get().is_some() { "Edit slide" } else { "Add slide" }}
                    </h2>
                    <div class="form-grid">
                        {field("Title", |f| f.title.clone(), |f, v| f.title = v)}
                        {field("Subtitle", |f| f.subtitle.clone(), |f, v| f.subtitle = v)}
                        {field("Image URL", |f| f.image_url.clone(), |f, v| f.image_url = v)}
                        {field("Link", |f| f.link.clone(), |f, v| f.link = v)}
                        {field("Position", |f| f.position.clone(), |f, v| f.position = v)}
                        <label class="checkbox">
                            <input
                                type="checkbox"
                                prop:checked=move || form.with(|f| f.active)
                                on:change=move |ev| {
                                    let checked = event_target_checked(&ev);
                                    set_form.update(|f| f.active = checked);
                                }
                            />
                            "Active"
                        </label>
                    </div>
                    {move || {
                        form_error.get().map(|message| view! { <p class="form-error">{message}</p> })
                    }}
                    <div class="form-actions">
                        <button type="submit" class="primary-btn">
                            {move || if editing.get().is_some() { "Update" } else { "Add" }}
                        </button>
                        <Show when=move || editing.get().is_some()>
                            <button type="button" class="secondary-btn" on:click=move |_| reset_form()>
                                "Cancel"
                            </button>
                        </Show>
                    </div>
                </form>

                <div class="card">
                    <div class="card-header">
                        <h2 class="card-title">"Hero Slides"</h2>
                    </div>
                    <div class="slide-grid">
                        <For
                            each=move || slides.get()
                            key=|s| {
                                (s.id.clone(), s.title.clone(), s.position, s.active, s.image_url.clone())
                            }
                            children={
                                let delete_slide = delete_slide.clone();
                                let toggle_active = toggle_active.clone();
                                move |slide| {
                                    let edit = slide.clone();
                                    let toggled = slide.clone();
                                    let id = slide.id.clone();
                                    let delete_slide = delete_slide.clone();
                                    let toggle_active = toggle_active.clone();
                                    view! {
                                        <div class="slide-card" class:inactive=!slide.active>
                                            <img src=slide.image_url.clone() alt=slide.title.clone() />
                                            <div class="slide-info">
                                                <strong>{slide.title.clone()}</strong>
                                                <span>{slide.subtitle.clone()}</span>
                                                <span class="slide-meta">{format!("#{}", slide.position)}</span>
                                            </div>
                                            <div class="actions">
                                                <button
                                                    class="secondary-btn"
                                                    on:click=move |_| toggle_active(toggled.clone())
                                                >
                                                    {if slide.active { "Hide" } else { "Show" }}
                                                </button>
                                                <button
                                                    class="secondary-btn"
                                                    on:click=move |_| {
                                                        set_form.set(SlideForm::from_slide(&edit));
                                                        set_editing.set(Some(edit.id.clone()));
                                                        set_form_error.set(None);
                                                    }
                                                >
                                                    "Edit"
                                                </button>
                                                <DeleteConfirmButton
                                                    record=slide.title.clone()
                                                    on_confirm=move |_| delete_slide(id.clone())
                                                />
                                            </div>
                                        </div>
                                    }
                                }
                            }
                        />
                    </div>
                </div>

                <div class="card">
                    <div class="card-header">
                        <h2 class="card-title">"Categories"</h2>
                    </div>
                    <form class="inline-form" on:submit=add_category.clone()>
                        <input
                            type="text"
                            placeholder="New category"
                            prop:value=move || new_category.get()
                            on:input=move |ev| set_new_category.set(event_target_value(&ev))
                        />
                        <button type="submit" class="primary-btn">"+"</button>
                    </form>
                    <ul class="category-list">
                        <For
                            each=move || categories.get()
                            key=|c| c.id.clone()
                            children={
                                let delete_category = delete_category.clone();
                                move |category| {
                                    let id = category.id.clone();
                                    let delete_category = delete_category.clone();
                                    view! {
                                        <li>
                                            <span>{category.name.clone()}</span>
                                            <DeleteConfirmButton
                                                record=category.name.clone()
                                                on_confirm=move |_| delete_category(id.clone())
                                            />
                                        </li>
                                    }
                                }
                            }
                        />
                    </ul>
                </div>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slide_form_validation() {
        let mut form = SlideForm::blank(3);
        form.title = "Diwali Sale".into();
        assert!(form.to_slide(None).is_err());

        form.image_url = "ftp://cdn/x.jpg".into();
        assert!(form.to_slide(None).is_err());

        form.image_url = "https://cdn.example.com/diwali.jpg".into();
        let slide = form.to_slide(Some("s1".into())).unwrap();
        assert_eq!(slide.position, 3);
        assert!(slide.active);
        assert_eq!(slide.link, None);
        assert_eq!(SlideForm::from_slide(&slide).to_slide(Some("s1".into())).unwrap(), slide);

        form.position = "first".into();
        assert!(form.to_slide(None).is_err());
    }

    #[test]
    fn test_next_position() {
        assert_eq!(next_position(&[]), 0);
        let slides = vec![
            HeroSlide { position: 4, ..Default::default() },
            HeroSlide { position: 1, ..Default::default() },
        ];
        assert_eq!(next_position(&slides), 5);
    }
}
