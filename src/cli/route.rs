//! CLI route: single route table and run context. Dispatches to the generation
//! services and presentation.

use crate::classify::{classify, Classification, ModuleKind, TbKind};
use crate::cli::parse::{Commands, InfoCommands, OutputFormat, SelectArgs};
use crate::cli::presentation::{
    format_check_result, format_fileinfo_json, format_fileinfo_text, format_filelist,
    format_generation_summary, format_kind_names, format_kind_table, format_render_outcome,
    format_template_paths,
};
use crate::config::{ConfigLoader, HwgenConfig};
use crate::error::GenError;
use crate::generation::{
    clean, generate, render_in_place, render_to_file, CleanRequest, GenerateRequest,
};
use crate::hierarchy::{
    matches_pattern, resolve_template, FileListQuery, FileListSource, ModuleTree,
};
use crate::render::{template_paths, ContextData, RenderEngine, TemplateEngine};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Runtime context for CLI execution: workspace, loaded config and the render engine.
pub struct RunContext {
    workspace_root: PathBuf,
    config: HwgenConfig,
    engine: Arc<dyn RenderEngine>,
}

impl RunContext {
    /// Create run context from workspace root and optional config path. Uses ConfigLoader only.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, GenError> {
        let config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };
        Ok(Self::with_config(workspace_root, config))
    }

    pub fn with_config(workspace_root: PathBuf, config: HwgenConfig) -> Self {
        Self {
            workspace_root,
            config,
            engine: Arc::new(TemplateEngine::new()),
        }
    }

    pub fn config(&self) -> &HwgenConfig {
        &self.config
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, GenError> {
        match command {
            Commands::Gen {
                select,
                maxworkers,
                define,
            } => self.handle_gen(select, *maxworkers, define),
            Commands::Cleangen {
                select,
                maxworkers,
                dry_run,
            } => self.handle_cleangen(select, *maxworkers, *dry_run),
            Commands::Rendergen {
                top,
                templates,
                genfile,
                define,
                paths,
            } => {
                let tree = self.load_tree(top, paths)?;
                let templates = Self::resolve_templates(&tree, templates);
                let data = defines_to_data(define);
                let outcome =
                    render_to_file(&tree, self.engine.as_ref(), &templates, genfile, data.as_ref())?;
                Ok(format_render_outcome(genfile, outcome))
            }
            Commands::Renderinplace {
                top,
                templates,
                inplacefile,
                ignore_unknown,
                define,
                paths,
            } => {
                let tree = self.load_tree(top, paths)?;
                let templates = Self::resolve_templates(&tree, templates);
                let data = defines_to_data(define);
                let outcome = render_in_place(
                    &tree,
                    self.engine.as_ref(),
                    &templates,
                    inplacefile,
                    *ignore_unknown,
                    data.as_ref(),
                )?;
                Ok(format_render_outcome(inplacefile, outcome))
            }
            Commands::Filelist { select } => {
                let tree = self.load_tree(&select.top, &select.paths)?;
                let paths: Vec<PathBuf> = Self::queries(select)
                    .flat_map(|query| {
                        tree.iter_filelists(&query)
                            .flat_map(|entry| entry.record.filepaths)
                            .collect::<Vec<_>>()
                    })
                    .collect();
                Ok(format_filelist(&paths))
            }
            Commands::Fileinfo { select, format } => {
                let tree = self.load_tree(&select.top, &select.paths)?;
                let entries: Vec<_> = Self::queries(select)
                    .flat_map(|query| tree.iter_filelists(&query).collect::<Vec<_>>())
                    .collect();
                match format {
                    OutputFormat::Json => format_fileinfo_json(&entries),
                    OutputFormat::Text => Ok(format_fileinfo_text(&entries)),
                }
            }
            Commands::Check { top, stat } => {
                let tree = ModuleTree::load(top)?;
                info!(top = %tree.top().name, "Design checked");
                let stat = stat.then(|| tree.stat());
                Ok(format_check_result(&tree.top().name, stat.as_ref()))
            }
            Commands::Ls {
                top,
                pattern,
                names,
                top_only,
                tb,
                generic_tb,
                tag,
            } => {
                let tree = ModuleTree::load(top)?;
                let kinds: Vec<(&ModuleKind, Classification)> = tree
                    .kinds()
                    .iter()
                    .filter(|kind| {
                        pattern.is_empty() || pattern.iter().any(|p| matches_pattern(p, &kind.name))
                    })
                    .map(|kind| (kind, classify(kind)))
                    .filter(|(_, class)| !*top_only || class.is_runnable)
                    .filter(|(_, class)| !*tb || class.tb.is_tb())
                    .filter(|(_, class)| !*generic_tb || class.tb == TbKind::Generic)
                    .filter(|(kind, _)| match tag {
                        Some(tag) => kind.tags.iter().any(|t| matches_pattern(tag, t)),
                        None => true,
                    })
                    .collect();
                if *names {
                    Ok(format_kind_names(&kinds))
                } else {
                    Ok(format_kind_table(&kinds))
                }
            }
            Commands::Info { command } => match command {
                InfoCommands::TemplatePaths { paths } => {
                    Ok(format_template_paths(&self.template_paths(paths)))
                }
            },
        }
    }

    fn handle_gen(
        &self,
        select: &SelectArgs,
        maxworkers: Option<usize>,
        define: &[(String, Value)],
    ) -> Result<String, GenError> {
        let tree = self.load_tree(&select.top, &select.paths)?;
        let data = defines_to_data(define);
        let mut sections = Vec::with_capacity(select.filelist.len());
        for filelist in &select.filelist {
            let request = GenerateRequest {
                filelist: filelist.clone(),
                target: select.target.clone(),
                max_level: select.maxlevel,
                max_workers: maxworkers.or(self.config.generation.max_workers),
                data: data.clone(),
            };
            let summary = generate(&tree, Arc::clone(&self.engine), &request)?;
            sections.push(format_generation_summary(&summary));
        }
        Ok(sections.join("\n\n"))
    }

    fn handle_cleangen(
        &self,
        select: &SelectArgs,
        maxworkers: Option<usize>,
        dry_run: bool,
    ) -> Result<String, GenError> {
        let tree = self.load_tree(&select.top, &select.paths)?;
        let mut sections = Vec::with_capacity(select.filelist.len());
        for filelist in &select.filelist {
            let request = CleanRequest {
                filelist: filelist.clone(),
                target: select.target.clone(),
                max_level: select.maxlevel,
                max_workers: maxworkers.or(self.config.generation.max_workers),
                dry_run,
                data: None,
            };
            let summary = clean(&tree, Arc::clone(&self.engine), &request)?;
            sections.push(format_generation_summary(&summary));
        }
        Ok(sections.join("\n\n"))
    }

    /// Template directories: configured ones, then discovered below the
    /// workspace root and the extra search paths.
    fn template_paths(&self, extra: &[PathBuf]) -> Vec<PathBuf> {
        let configured: Vec<PathBuf> = self
            .config
            .generation
            .template_paths
            .iter()
            .map(|path| self.anchor(path))
            .collect();
        let mut search: Vec<PathBuf> = extra.to_vec();
        search.push(self.workspace_root.clone());
        template_paths(&configured, &search)
    }

    fn anchor(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.workspace_root.join(path)
        }
    }

    fn load_tree(&self, top: &Path, extra: &[PathBuf]) -> Result<ModuleTree, GenError> {
        let paths = self.template_paths(extra);
        debug!(manifest = %top.display(), template_paths = paths.len(), "Loading design");
        Ok(ModuleTree::load(top)?.with_template_paths(paths))
    }

    fn resolve_templates(tree: &ModuleTree, templates: &[PathBuf]) -> Vec<PathBuf> {
        templates
            .iter()
            .map(|template| resolve_template(template, tree.base_dir(), tree.template_paths()))
            .collect()
    }

    fn queries(select: &SelectArgs) -> impl Iterator<Item = FileListQuery> + '_ {
        select.filelist.iter().map(move |name| {
            FileListQuery::new(name.clone())
                .with_target(select.target.clone())
                .with_max_level(select.maxlevel)
        })
    }
}

fn defines_to_data(define: &[(String, Value)]) -> Option<ContextData> {
    if define.is_empty() {
        return None;
    }
    Some(define.iter().cloned().collect())
}
