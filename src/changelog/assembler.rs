//! Drives the section builder over one range or every version boundary.
use log::*;
use std::iter;

use crate::{
    Result,
    changelog::{
        builder::SectionBuilder,
        types::{Changelog, Section},
    },
};

/// Revision pairs `(from, to)` for every version boundary, newest first.
///
/// The boundary list is the tags (newest first) framed by an empty string on
/// each side: the leading one is the unreleased tip, the trailing one is the
/// repository root. Each adjacent pair is one section.
pub fn boundary_pairs(tags: &[String]) -> Vec<(String, String)> {
    let boundaries = iter::once("")
        .chain(tags.iter().map(String::as_str))
        .chain(iter::once(""))
        .collect::<Vec<&str>>();

    boundaries
        .windows(2)
        .map(|pair| {
            let (to, from) = (pair[0], pair[1]);
            (from.to_string(), to.to_string())
        })
        .collect()
}

/// Replace an empty (unreleased) `to_revision` with the caller's label for
/// the upcoming version.
fn apply_next_version(section: &mut Section, next_version: Option<&str>) {
    if let Some(label) = next_version
        && !label.is_empty()
        && section.to_revision.is_empty()
    {
        debug!("labeling unreleased section as {label}");
        section.to_revision = label.to_string();
    }
}

/// Assembles sections into a changelog.
pub struct Assembler {
    builder: SectionBuilder,
}

impl Assembler {
    pub fn new(builder: SectionBuilder) -> Self {
        Self { builder }
    }

    /// Build one section for an explicit range. With neither `from` nor `to`
    /// given, the range starts at the latest version tag.
    pub async fn single(
        &self,
        from: Option<&str>,
        to: Option<&str>,
        next_version: Option<&str>,
    ) -> Section {
        let mut from = from.unwrap_or("").to_string();
        let to = to.unwrap_or("");

        if from.is_empty() && to.is_empty() {
            from = match self.builder.repo().latest_semver_tag().await {
                Ok(Some(tag)) => tag,
                Ok(None) => {
                    info!("no version tags found: using full history");
                    "".into()
                }
                Err(err) => {
                    error!("failed to find latest version tag: {err}");
                    "".into()
                }
            };
        }

        let mut section = self.builder.build(&from, to).await;
        apply_next_version(&mut section, next_version);
        section
    }

    /// Build a section for every version boundary, newest first. A
    /// repository without version tags yields one section covering its
    /// whole history.
    pub async fn all(&self, next_version: Option<&str>) -> Result<Changelog> {
        let tags = self.builder.repo().version_tags().await?;

        info!("found {} version tags", tags.len());

        let mut changelog = Changelog::default();

        for (index, (from, to)) in boundary_pairs(&tags).iter().enumerate() {
            let mut section = self.builder.build(from, to).await;

            if index == 0 {
                apply_next_version(&mut section, next_version);
            }

            changelog.sections.push(section);
        }

        Ok(changelog)
    }
}

#[cfg(test)]
#[path = "./assembler_tests.rs"]
mod tests;
