use anyhow::Context;
use handlebars::Handlebars;

pub(crate) const POST_TEMPLATE_NAME: &str = "post";

// Nikola reads its metadata from an HTML comment at the top of the file.
const POST_TEMPLATE: &str = "<!--
.. title: {{title}}
.. date: {{date}}
.. slug: {{slug}}
.. link:{{#if link}} {{link}}{{/if}}
.. description:{{#if description}} {{description}}{{/if}}
.. tags:{{#if tags}} {{tags}}{{/if}}
-->

{{body}}";

pub(crate) fn generate_renderer() -> anyhow::Result<Handlebars<'static>> {
    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);
    handlebars
        .register_template_string(POST_TEMPLATE_NAME, POST_TEMPLATE)
        .context("post template")?;

    Ok(handlebars)
}
