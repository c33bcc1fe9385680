use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;

use dockyard::persist::{AppLayout, LayoutStore};

mod cli;

use cli::{CliArgs, Command};

fn main() -> Result<()> {
    dockyard::tracing::init();

    let args = CliArgs::parse();
    let config = args.load_config();

    match &args.command {
        Command::Config => {
            let yaml = serde_yaml::to_string(&config).context("Failed to serialize config")?;
            print!("{}", yaml);
        }
        Command::Inspect { .. } => {
            let path = args.layout_path(&config).map_err(anyhow::Error::msg)?;
            let layout = load(&path)?;
            inspect(&layout, config.always_show_tabs)?;
        }
        Command::Check { .. } => {
            let path = args.layout_path(&config).map_err(anyhow::Error::msg)?;
            let layout = load(&path)?;
            println!(
                "{}: ok ({} window(s), {} panel(s), {} undocked)",
                path.display(),
                layout.windows.len(),
                layout.panel_ids().len(),
                layout.undocked.len()
            );
        }
    }

    Ok(())
}

fn load(path: &Path) -> Result<AppLayout> {
    LayoutStore::new(path)
        .load()
        .with_context(|| format!("Layout {} cannot be restored", path.display()))
}

fn inspect(layout: &AppLayout, always_show_tabs: bool) -> Result<()> {
    println!("layout version {}", layout.version);
    for (index, window) in layout.windows.iter().enumerate() {
        println!(
            "window {}{} at ({}, {}) size {}x{} {:?}",
            index,
            if window.main { " [main]" } else { "" },
            window.position.x,
            window.position.y,
            window.size.width,
            window.size.height,
            window.state
        );
        if let Some(maximized) = &window.maximized {
            println!("  maximized: {}", maximized);
        }
        for id in window.auto_hide.ids() {
            println!("  auto-hidden: {}", id);
        }
        let tree = window
            .to_tree(always_show_tabs)
            .with_context(|| format!("Window {} has an invalid tree", index))?;
        for line in tree.outline().lines() {
            println!("  {}", line);
        }
    }
    for (id, panel) in &layout.undocked {
        println!("undocked: {} ({})", id, panel.class_name);
    }
    Ok(())
}
