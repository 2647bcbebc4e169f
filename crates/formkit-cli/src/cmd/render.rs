use crate::cmd::source::FormSource;
use crate::output::print_json;
use anyhow::Result;
use formkit_core::page::{compose_page, PageContext};
use formkit_core::render::render_form;
use formkit_server::embed::page_template;
use formkit_server::surface::generate_nonce;

pub fn run(source: &FormSource, page: bool, json: bool) -> Result<()> {
    let form = source.load()?;
    let markup = render_form(&form);

    let html = if page {
        let nonce = generate_nonce();
        let ctx = PageContext {
            nonce: &nonce,
            session: "preview",
            title: form.title(),
        };
        compose_page(&page_template()?, &ctx, &markup)?
    } else {
        markup
    };

    if json {
        print_json(&serde_json::json!({
            "id": form.id(),
            "title": form.title(),
            "html": html,
        }))?;
    } else {
        print!("{html}");
    }
    Ok(())
}
