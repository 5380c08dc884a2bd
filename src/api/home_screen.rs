//! Home Screen Endpoints
//!
//! Storefront hero slides and product categories.

use super::{path_segment, ApiClient, ListResponse};
use crate::error::ApiResult;
use crate::models::{Category, HeroSlide};

// ========================
// Hero Slides
// ========================

pub async fn list_hero_slides(client: &ApiClient) -> ApiResult<Vec<HeroSlide>> {
    let mut slides = client.get::<ListResponse<HeroSlide>>("hero-slides").await?.into_vec();
    slides.sort_by_key(|s| s.position);
    Ok(slides)
}

pub async fn create_hero_slide(client: &ApiClient, slide: &HeroSlide) -> ApiResult<HeroSlide> {
    client.post("hero-slides", slide).await
}

pub async fn update_hero_slide(client: &ApiClient, slide: &HeroSlide) -> ApiResult<HeroSlide> {
    client.put(&format!("hero-slides/{}", path_segment(&slide.id)), slide).await
}

pub async fn delete_hero_slide(client: &ApiClient, id: &str) -> ApiResult<()> {
    client.delete(&format!("hero-slides/{}", path_segment(id))).await
}

// ========================
// Categories
// ========================

pub async fn list_categories(client: &ApiClient) -> ApiResult<Vec<Category>> {
    Ok(client.get::<ListResponse<Category>>("categories").await?.into_vec())
}

pub async fn create_category(client: &ApiClient, category: &Category) -> ApiResult<Category> {
    client.post("categories", category).await
}

pub async fn delete_category(client: &ApiClient, id: &str) -> ApiResult<()> {
    client.delete(&format!("categories/{}", path_segment(id))).await
}
