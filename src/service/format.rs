//! Turns raw recipe documents into the shapes pages consume.

use crate::models::{BrandSummary, CategorySummary, Recipe, RecipeCard};
use crate::repository::GroupCount;

const PARAGRAPH: &str = "text-slate-700 leading-relaxed mb-4";
const SECTION_HEADING: &str = "text-2xl font-bold text-slate-900 mb-4 mt-8 pb-2 border-b border-slate-200";
const SUB_HEADING: &str = "text-xl font-bold text-slate-900 mb-3 mt-6";
const QUOTE_CHARS: &[char] = &['"', '\'', '\u{201C}', '\u{201D}', '\u{2018}', '\u{2019}', '\u{AB}', '\u{BB}'];

pub fn recipe_card(recipe: &Recipe) -> RecipeCard {
    RecipeCard {
        id: recipe.id.clone(),
        title: recipe.title.clone(),
        description: recipe.description.clone(),
        brand: recipe.brand.clone(),
        category: category_label(&recipe.food_type),
        image: recipe.image.clone(),
        image_alt: recipe
            .image_alt
            .clone()
            .filter(|alt| !alt.is_empty())
            .unwrap_or_else(|| recipe.title.clone()),
        url: recipe.url(),
        rating: recipe.rating.summary(),
    }
}

pub fn recipe_cards(recipes: &[Recipe]) -> Vec<RecipeCard> {
    recipes.iter().map(recipe_card).collect()
}

fn category_label(food_type: &str) -> String {
    if food_type.is_empty() {
        "Recipe".to_string()
    } else {
        food_type.to_string()
    }
}

/// Lowercases and replaces every character outside `[a-z0-9]` with `-`.
pub fn category_slug(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_lowercase() || c.is_ascii_digit() { c } else { '-' })
        .collect()
}

pub fn brand_summaries(groups: Vec<GroupCount>) -> Vec<BrandSummary> {
    groups
        .into_iter()
        .map(|g| BrandSummary {
            name: g.name,
            brand_slug: g.slug,
            count: g.count,
        })
        .collect()
}

pub fn category_summaries(groups: Vec<GroupCount>) -> Vec<CategorySummary> {
    groups
        .into_iter()
        .map(|g| {
            let category_slug = if g.slug.is_empty() {
                category_slug(&g.name)
            } else {
                g.slug
            };
            CategorySummary {
                name: g.name,
                category_slug,
                count: g.count,
            }
        })
        .collect()
}

/// "taco-bell" -> "Taco Bell"
pub fn display_name(slug: &str) -> String {
    slug.split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Title without surrounding quote marks.
pub fn display_title(title: &str) -> String {
    title.trim_matches(QUOTE_CHARS).trim().to_string()
}

pub fn page_description(recipe: &Recipe) -> String {
    match recipe.seo_description.as_deref().filter(|d| !d.is_empty()) {
        Some(description) => description.to_string(),
        None => format!(
            "Learn how to make {} at home with this copycat recipe from {}.",
            display_title(&recipe.title),
            recipe.brand
        ),
    }
}

pub fn total_pages(total: u64, page_size: usize) -> u64 {
    total.div_ceil(page_size as u64)
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn non_blank(items: &[String]) -> impl Iterator<Item = &str> {
    items.iter().map(|s| s.trim()).filter(|s| !s.is_empty())
}

/// Body HTML for a recipe page.
///
/// Structured ingredients and instructions win; otherwise the markdown source is split
/// into paragraphs; otherwise a placeholder is shown.
pub fn parsed_content(recipe: &Recipe) -> String {
    if !recipe.ingredients.is_empty() && !recipe.instructions.is_empty() {
        return structured_content(recipe);
    }

    if let Some(markdown) = recipe.content_markdown.as_deref().filter(|m| !m.trim().is_empty()) {
        return markdown
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(|p| format!(r#"<p class="{PARAGRAPH}">{}</p>"#, escape_html(p)))
            .collect::<Vec<_>>()
            .join("\n");
    }

    format!(
        r#"<p class="{PARAGRAPH}">Recipe content is being processed and will be available soon.</p>"#
    )
}

fn structured_content(recipe: &Recipe) -> String {
    let mut html = String::from(r#"<div class="recipe-structured-content">"#);

    html.push_str(&format!(r#"<h2 class="{SECTION_HEADING}">Ingredients</h2><ul>"#));
    for ingredient in non_blank(&recipe.ingredients) {
        html.push_str(&format!("<li>{}</li>", escape_html(ingredient)));
    }
    html.push_str("</ul>");

    html.push_str(&format!(r#"<h2 class="{SECTION_HEADING}">Instructions</h2><ol>"#));
    for (step, instruction) in non_blank(&recipe.instructions).enumerate() {
        html.push_str(&format!(
            "<li><span>Step {}:</span> {}</li>",
            step + 1,
            escape_html(instruction)
        ));
    }
    html.push_str("</ol>");

    if non_blank(&recipe.tips).next().is_some() {
        html.push_str(&format!(r#"<h3 class="{SUB_HEADING}">Tips</h3><ul>"#));
        for tip in non_blank(&recipe.tips) {
            html.push_str(&format!("<li>{}</li>", escape_html(tip)));
        }
        html.push_str("</ul>");
    }

    if let Some(notes) = recipe.notes.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        html.push_str(&format!(
            r#"<h3 class="{SUB_HEADING}">Notes</h3><p class="{PARAGRAPH}">{}</p>"#,
            escape_html(notes)
        ));
    }

    html.push_str("</div>");
    html
}
