//! Runs a changelog generation from parsed arguments.
use log::*;
use std::{path::Path, sync::Arc};
use tokio::fs;

use crate::{
    Result,
    changelog::{
        assembler::Assembler,
        builder::SectionBuilder,
        render::{render_changelog, render_section},
    },
    cli::{Args, ChangelogOptions},
    forge::{config::RemoteConfig, github::Github, manager::ForgeManager},
    repo::{LocalRepo, Repository},
};

/// Open the repository, connect the forge and write the changelog.
pub async fn execute(args: &Args) -> Result<()> {
    let options = args.changelog_options()?;

    if args.git != "git" {
        debug!(
            "git executable {} not used: repository is read in-process",
            args.git
        );
    }

    let repo: Arc<dyn Repository> =
        Arc::new(LocalRepo::open(Path::new(&args.repo))?);

    let identity =
        SectionBuilder::resolve_identity(repo.as_ref(), &args.remote).await;

    let token = args.resolve_token(repo.as_ref()).await;

    let forge = Github::new(RemoteConfig {
        host: identity.host.clone(),
        token,
        ..Default::default()
    })?;

    let provider = Arc::new(ForgeManager::new(Box::new(forge), repo.clone()));

    let assembler =
        Assembler::new(SectionBuilder::new(repo, provider, identity));

    if let Some(output) = generate(&assembler, &options).await? {
        write_output(&output, args.out_file.as_deref()).await?;
    }

    Ok(())
}

/// Assemble and render according to `options`. A render failure is logged
/// and yields `None` so nothing partial is written.
pub async fn generate(
    assembler: &Assembler,
    options: &ChangelogOptions,
) -> Result<Option<String>> {
    let next_version = options.next_version.as_deref();

    let rendered = if options.all {
        let changelog = assembler.all(next_version).await?;
        render_changelog(&changelog, options.format)
    } else {
        let section = assembler
            .single(options.from.as_deref(), options.to.as_deref(), next_version)
            .await;
        render_section(&section, options.format)
    };

    match rendered {
        Ok(output) => Ok(Some(output)),
        Err(err) => {
            error!("failed to render changelog: {err}");
            Ok(None)
        }
    }
}

async fn write_output(output: &str, out_file: Option<&str>) -> Result<()> {
    if let Some(out_file) = out_file {
        let file_path = Path::new(out_file);

        if let Some(parent) = file_path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).await?;
        }

        info!("writing changelog to: {}", file_path.display());
        fs::write(file_path, format!("{output}\n")).await?;
    } else {
        println!("{output}");
    }

    Ok(())
}
