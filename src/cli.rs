use clap::{Args, Parser, Subcommand};

/// kubesweep — cleans up stale Kubernetes/OpenShift resources
#[derive(Parser, Debug)]
#[command(name = "kubesweep", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Batch mode: disable logging, print only the affected resource names
    #[arg(short, long, global = true, default_value_t = false)]
    pub batch: bool,

    /// Log level to use
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    /// Shorthand for --log-level debug
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Clean up image stream tags no longer backed by git history
    #[command(subcommand, visible_aliases = ["image", "img"])]
    Images(ImagesCommand),

    /// Clean up unused ConfigMaps
    #[command(visible_aliases = ["configmap", "cm"])]
    Configmaps(ResourceArgs),

    /// Clean up unused Secrets
    #[command(visible_alias = "secret")]
    Secrets(ResourceArgs),

    /// Clean up empty Namespaces
    #[command(visible_aliases = ["namespace", "ns"])]
    Namespaces(NamespaceArgs),
}

#[derive(Subcommand, Debug)]
pub enum ImagesCommand {
    /// Delete excessive image tags matching the git history
    #[command(visible_alias = "hist")]
    History(HistoryArgs),

    /// Delete image tags not found in the git history
    #[command(visible_alias = "orph")]
    Orphans(OrphanArgs),
}

#[derive(Args, Debug)]
pub struct GitArgs {
    /// Compare git tags instead of commit hashes with the image tags
    #[arg(short, long, default_value_t = false)]
    pub tags: bool,

    /// Sort git tags by this criteria; only effective with --tags.
    /// Allowed values: [version, alphabetic]
    #[arg(long, default_value = "version")]
    pub sort: String,

    /// Only look at the first <l> commits (or tags). 0 means all;
    /// limited effect if the repository is a shallow clone
    #[arg(short = 'l', long, default_value_t = 0)]
    pub commit_limit: usize,

    /// Path to the git repository
    #[arg(short = 'p', long, default_value = ".")]
    pub repo_path: String,
}

#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Image to clean up, as IMAGE, NAMESPACE/IMAGE or REGISTRY/NAMESPACE/IMAGE
    pub image: String,

    #[command(flatten)]
    pub git: GitArgs,

    /// Keep the most current <k> image tags
    #[arg(short, long, default_value_t = 3)]
    pub keep: usize,

    /// Effectively delete the image tags found (default is dry-run)
    #[arg(short, long, default_value_t = false)]
    pub delete: bool,
}

#[derive(Args, Debug)]
pub struct OrphanArgs {
    /// Image to clean up, as IMAGE, NAMESPACE/IMAGE or REGISTRY/NAMESPACE/IMAGE
    pub image: String,

    #[command(flatten)]
    pub git: GitArgs,

    /// Delete image tags that are older than the duration, e.g. 1y2mo3w4d5h6m7s
    #[arg(long, default_value = "1w")]
    pub older_than: String,

    /// Only delete image tags matching this regex; defaults to git SHA-1 hashes
    #[arg(short = 'r', long, default_value = "^[a-z0-9]{40}$")]
    pub deletion_pattern: String,

    /// Effectively delete the image tags found (default is dry-run)
    #[arg(short, long, default_value_t = false)]
    pub delete: bool,
}

#[derive(Args, Debug)]
pub struct ResourceArgs {
    /// Identify the resources by these "key=value" labels (repeatable)
    #[arg(short, long)]
    pub label: Vec<String>,

    /// Keep the most current <k> resources; used resources are never deleted
    #[arg(short, long, default_value_t = 3)]
    pub keep: usize,

    /// Delete resources that are older than the duration, e.g. 1y2mo3w4d5h6m7s
    #[arg(long, default_value = "1w")]
    pub older_than: String,

    /// Namespace to clean up; defaults to the kubeconfig namespace
    #[arg(short, long)]
    pub namespace: Option<String>,

    /// Effectively delete the resources found (default is dry-run)
    #[arg(short, long, default_value_t = false)]
    pub delete: bool,
}

#[derive(Args, Debug)]
pub struct NamespaceArgs {
    /// Identify the namespaces by these "key=value" labels (repeatable)
    #[arg(short, long)]
    pub label: Vec<String>,

    /// Keep the most current <k> namespaces
    #[arg(short, long, default_value_t = 3)]
    pub keep: usize,

    /// Delete namespaces that are older than the duration, e.g. 1y2mo3w4d5h6m7s
    #[arg(long, default_value = "1w")]
    pub older_than: String,

    /// Effectively delete the namespaces found (default is dry-run)
    #[arg(short, long, default_value_t = false)]
    pub delete: bool,
}
