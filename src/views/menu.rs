use askama::Template;
use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Response};
use axum_extra::extract::CookieJar;
use uuid::Uuid;

use crate::auth::extractor::OptionalAuthUser;
use crate::db;
use crate::error::AppError;
use crate::flash;
use crate::state::SharedState;

#[derive(Template)]
#[template(path = "menu/list.html")]
struct MenuListTemplate {
    flash: Option<String>,
    user_name: Option<String>,
    categories: Vec<CategoryBlock>,
}

#[derive(Template)]
#[template(path = "menu/item.html")]
struct MenuItemTemplate {
    flash: Option<String>,
    user_name: Option<String>,
    item: ItemRow,
    allergy_note: Option<String>,
}

pub struct CategoryBlock {
    pub name: String,
    pub items: Vec<ItemRow>,
}

pub struct ItemRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price_display: String,
    pub allergens: Vec<String>,
}

pub async fn list_page(
    OptionalAuthUser(auth): OptionalAuthUser,
    State(state): State<SharedState>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let categories = db::menu::list_categories(&state.pool).await?;

    let mut blocks = Vec::with_capacity(categories.len());
    for category in categories {
        let items = db::menu::list_items_by_category(&state.pool, category.id).await?;
        blocks.push(CategoryBlock {
            name: category.name,
            items: items
                .iter()
                .map(|i| ItemRow {
                    id: i.id,
                    name: i.name.clone(),
                    description: i.description.clone(),
                    price_display: i.price_display(),
                    allergens: i.allergen_list(),
                })
                .collect(),
        });
    }

    let (jar, flash) = flash::take(jar);
    let template = MenuListTemplate {
        flash,
        user_name: auth.map(|a| a.name),
        categories: blocks,
    };
    Ok((jar, Html(template.render().unwrap_or_default())).into_response())
}

pub async fn item_page(
    OptionalAuthUser(auth): OptionalAuthUser,
    State(state): State<SharedState>,
    jar: CookieJar,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let item = db::menu::find_item_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Menu item not found".to_string()))?;

    let allergens = item.allergen_list();
    let allergy_note = (!allergens.is_empty()).then(|| allergens.join(", "));

    let (jar, flash) = flash::take(jar);
    let template = MenuItemTemplate {
        flash,
        user_name: auth.map(|a| a.name),
        item: ItemRow {
            id: item.id,
            name: item.name.clone(),
            description: item.description.clone(),
            price_display: item.price_display(),
            allergens,
        },
        allergy_note,
    };
    Ok((jar, Html(template.render().unwrap_or_default())).into_response())
}
