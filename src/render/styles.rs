//! Style browser and beverage list fragments

use askama::Template;
use serde::Serialize;

use super::{script_json, RenderError};
use crate::data::{Beverage, Style};

#[derive(Template)]
#[template(path = "style_browser.html")]
struct StyleBrowserTemplate<'a> {
    styles: &'a [Style],
    payload: &'a str,
}

/// What the browser script needs to perform a drilldown
#[derive(Serialize)]
struct Drilldown<'a> {
    url: &'a str,
    token: &'a str,
}

#[derive(Template)]
#[template(path = "beverage_list.html")]
struct BeverageListTemplate<'a> {
    beverages: &'a [Beverage],
}

/// Render the list of styles with its drilldown script
///
/// # Arguments
/// * `styles` - Styles in display order
/// * `drilldown_url` - Endpoint the script POSTs `style_id` and `token` to
/// * `token` - Anti-forgery token for the drilldown action
pub fn render_style_browser(
    styles: &[Style],
    drilldown_url: &str,
    token: &str,
) -> Result<String, RenderError> {
    let payload = script_json(&Drilldown {
        url: drilldown_url,
        token,
    })?;
    let template = StyleBrowserTemplate {
        styles,
        payload: &payload,
    };
    Ok(template.render()?)
}

/// Render the beers of one style; this replaces the style browser in place
pub fn render_beverage_list(beverages: &[Beverage]) -> Result<String, RenderError> {
    Ok(BeverageListTemplate { beverages }.render()?)
}
