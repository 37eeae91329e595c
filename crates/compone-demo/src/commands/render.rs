//! Demo page render command.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use compone::{
    content, props, Component, ComponeResult, ComponentType, Props, RenderOptions, Signature,
    Value,
};
use compone_html as h;
use serde::Deserialize;

/// Configuration file structure (compone.toml).
///
/// The `[render]` table is read separately through [`RenderOptions`].
#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    page: PageConfig,
}

#[derive(Debug, Deserialize)]
struct PageConfig {
    #[serde(default = "default_title")]
    title: String,
    #[serde(default = "default_items")]
    items: Vec<String>,
    footer: Option<String>,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            items: default_items(),
            footer: None,
        }
    }
}

fn default_title() -> String {
    "Page title".to_string()
}
fn default_items() -> Vec<String> {
    vec!["György".to_string(), "Dóri".to_string()]
}

struct Settings {
    page: PageConfig,
    render: RenderOptions,
}

fn parse_config(content: &str) -> Result<Settings> {
    let file: ConfigFile = toml::from_str(content)?;
    let render = RenderOptions::from_toml_str(content)?;
    Ok(Settings {
        page: file.page,
        render,
    })
}

/// Load configuration from the given path if it exists.
/// Returns an error if the config file exists but is malformed.
fn load_config(path: &Path) -> Result<Settings> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let settings = parse_config(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        tracing::info!("Loaded config from {}", path.display());
        return Ok(settings);
    }
    tracing::debug!("No config at {}, using defaults", path.display());
    Ok(Settings {
        page: PageConfig::default(),
        render: RenderOptions::default(),
    })
}

fn layout() -> ComponeResult<ComponentType> {
    ComponentType::function(
        "Layout",
        Signature::new().param("title").children(),
        |args| {
            let page = h::html().bind(content![
                h::head().bind(h::title().bind(args.value("title")?.clone())?)?,
                h::body().bind(args.children().cloned())?,
            ])?;
            Ok(Value::Component(page))
        },
    )
}

fn unord_list() -> ComponeResult<ComponentType> {
    ComponentType::function("UnordList", Signature::new().param("elems"), |args| {
        let items = args
            .value("elems")?
            .as_list()
            .unwrap_or_default()
            .iter()
            .map(|elem| h::li().bind(elem.clone()).map(Value::Component))
            .collect::<ComponeResult<Vec<_>>>()?;
        Ok(Value::Component(h::ul().bind(items)?))
    })
}

fn page_footer(text: &str) -> ComponeResult<Component> {
    let footer = h::footer().with_props(props! {
        "class_" => h::classes([("page-footer", true), ("muted", true)]),
    })?;
    footer.scope(|footer| {
        footer.push(text);
    });
    Ok(footer)
}

fn build_page(page: &PageConfig) -> ComponeResult<Component> {
    let items = Value::list(page.items.iter().map(String::as_str));
    let footer = page.footer.as_deref().map(page_footer).transpose()?;

    let layout = layout()?
        .with_props(props! { "title" => page.title.as_str() })?
        .lazy();
    layout.bind(content![
        h::p().bind(page.title.as_str())?,
        "<div>HTML string</div>",
        unord_list()?.call(vec![items], Props::new())?,
        h::div().bind(content!["<br>", h::br().create()?])?,
        footer,
    ])?;
    Ok(layout)
}

/// Run the render command.
pub fn run(
    config: &Path,
    output: Option<PathBuf>,
    title: Option<String>,
    doctype: Option<bool>,
) -> Result<()> {
    let mut settings = load_config(config)?;
    if let Some(title) = title {
        settings.page.title = title;
    }
    if let Some(doctype) = doctype {
        settings.render.doctype = doctype;
    }

    let page = build_page(&settings.page)?;
    tracing::debug!("Built {page:?}");
    let html = page.render_document(&settings.render)?;

    match output {
        Some(path) => {
            fs::write(&path, html.as_str())
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Output: {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{html}")?;
        }
    }

    Ok(())
}
