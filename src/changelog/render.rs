//! Renders sections as JSON or as a markdown document.
use clap::ValueEnum;
use color_eyre::eyre::eyre;
use log::*;
use std::sync::LazyLock;
use tera::{Context, Tera};

use crate::{
    Result,
    changelog::types::{Changelog, Section},
};

const SECTION_TEMPLATE_NAME: &str = "section.md";

const SECTION_TEMPLATE: &str = r#"{% if to_revision %}## [{{ to_revision }}](https://{{ host }}/{{ owner }}/{{ repo }}/releases/tag/{{ to_revision }}){% else %}## Unreleased{% endif %}{% if changed_on %} ({{ changed_on }}){% endif %}
{% for pr in pull_requests %}
* {{ pr.title }} [#{{ pr.number }}](https://{{ host }}/{{ owner }}/{{ repo }}/pull/{{ pr.number }}) ([{{ pr.user.login }}](https://{{ host }}/{{ pr.user.login }}))
{%- endfor %}"#;

// Parsed once on first use and shared read-only afterwards.
static TEMPLATES: LazyLock<tera::Result<Tera>> = LazyLock::new(|| {
    let mut tera = Tera::default();
    tera.add_raw_template(SECTION_TEMPLATE_NAME, SECTION_TEMPLATE)?;
    Ok(tera)
});

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Pretty printed JSON.
    #[default]
    #[value(alias = "structured")]
    Json,
    /// Markdown release notes.
    #[value(alias = "document")]
    Markdown,
}

/// Pretty printed JSON for a section.
pub fn section_to_json(section: &Section) -> Result<String> {
    Ok(serde_json::to_string_pretty(section)?)
}

/// Pretty printed JSON for a full changelog.
pub fn changelog_to_json(changelog: &Changelog) -> Result<String> {
    Ok(serde_json::to_string_pretty(changelog)?)
}

/// Markdown for one section: a heading linking the release, then one bullet
/// per pull request. An untagged section is headed "Unreleased".
pub fn section_to_markdown(section: &Section) -> Result<String> {
    let tera = TEMPLATES
        .as_ref()
        .map_err(|err| eyre!("failed to load changelog template: {err}"))?;

    let mut context = Context::from_serialize(section)?;

    let changed_on = section
        .changed_at
        .map(|t| t.format("%Y-%m-%d").to_string())
        .unwrap_or_default();

    context.insert("changed_on", &changed_on);

    let rendered = tera.render(SECTION_TEMPLATE_NAME, &context)?;

    Ok(rendered.trim_end().to_string())
}

/// Markdown for a full changelog, sections separated by a blank line. A
/// section that fails to render is logged and left out.
pub fn changelog_to_markdown(changelog: &Changelog) -> String {
    changelog_to_markdown_with(changelog, section_to_markdown)
}

fn changelog_to_markdown_with(
    changelog: &Changelog,
    render: impl Fn(&Section) -> Result<String>,
) -> String {
    changelog
        .sections
        .iter()
        .filter_map(|section| match render(section) {
            Ok(rendered) => Some(rendered),
            Err(err) => {
                error!(
                    "failed to render section {}..{}: {err}",
                    section.from_revision, section.to_revision
                );
                None
            }
        })
        .collect::<Vec<String>>()
        .join("\n\n")
}

/// Render a single section in the requested format.
pub fn render_section(section: &Section, format: Format) -> Result<String> {
    match format {
        Format::Json => section_to_json(section),
        Format::Markdown => section_to_markdown(section),
    }
}

/// Render a full changelog in the requested format.
pub fn render_changelog(changelog: &Changelog, format: Format) -> Result<String> {
    match format {
        Format::Json => changelog_to_json(changelog),
        Format::Markdown => Ok(changelog_to_markdown(changelog)),
    }
}

#[cfg(test)]
#[path = "./render_tests.rs"]
mod tests;
