use crate::error::{FormError, Result};
use crate::render::escape_html;

const APP_ANCHOR: &str = "<div id=\"app\">";

/// Values substituted into a page template.
#[derive(Debug, Clone)]
pub struct PageContext<'a> {
    /// Content-Security-Policy nonce for inline and same-origin scripts.
    pub nonce: &'a str,
    pub session: &'a str,
    pub title: &'a str,
}

/// Fill `{{nonce}}`, `{{session}}` and `{{title}}` placeholders and inject the
/// rendered form right after the `<div id="app">` anchor.
pub fn compose_page(template: &str, ctx: &PageContext<'_>, form_markup: &str) -> Result<String> {
    let filled = template
        .replace("{{nonce}}", ctx.nonce)
        .replace("{{session}}", &escape_html(ctx.session))
        .replace("{{title}}", &escape_html(ctx.title));

    let at = filled.find(APP_ANCHOR).ok_or(FormError::MissingAppAnchor)? + APP_ANCHOR.len();
    let mut page = String::with_capacity(filled.len() + form_markup.len());
    page.push_str(&filled[..at]);
    page.push_str(form_markup);
    page.push_str(&filled[at..]);
    Ok(page)
}
