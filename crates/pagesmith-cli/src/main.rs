use clap::{Parser, Subcommand};
use pagesmith_ai::{edit_session, generate_session, GenerationClient, SiteBrief, THEMES};
use pagesmith_bundle::{data_uri, mime_for_upload, package};
use pagesmith_patch::{DesignDocument, Session, TokenSet};
use std::path::Path;

#[derive(Parser)]
#[command(name = "pagesmith")]
#[command(about = "pagesmith — AI landing-page generator and editor")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a landing page from a TOML site brief
    Generate {
        /// Site brief file
        #[arg(long)]
        brief: String,
        /// Project directory to write index.html and styles.css into
        #[arg(long)]
        out: String,
        /// Override the generation model
        #[arg(long)]
        model: Option<String>,
        /// Generation temperature (0.2–1.4)
        #[arg(long)]
        temperature: Option<f32>,
    },

    /// Apply a natural-language edit to an existing project
    Edit {
        /// The edit instruction (blank falls back to a general polish)
        instruction: String,
        #[arg(long)]
        project: String,
    },

    /// List or rewrite the design tokens of the project stylesheet
    Tokens {
        #[arg(long)]
        project: String,
        /// Token updates, e.g. --set --accent=#ff0044 (repeatable)
        #[arg(long = "set", value_name = "NAME=VALUE")]
        set: Vec<String>,
    },

    /// Replace the first heading and/or the lead text
    Text {
        #[arg(long)]
        project: String,
        #[arg(long)]
        heading: Option<String>,
        #[arg(long)]
        subtext: Option<String>,
    },

    /// Replace an image placeholder with an uploaded file
    Image {
        #[arg(long)]
        project: String,
        /// 1-based slot number, in document order
        #[arg(long)]
        slot: usize,
        /// Image file (png, jpg, jpeg, webp)
        #[arg(long)]
        file: String,
    },

    /// Package the project as a deployable zip archive
    Pack {
        #[arg(long)]
        project: String,
        /// Output archive path
        #[arg(long)]
        out: String,
    },

    /// List the curated style themes
    Themes,
}

fn main() {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Command::Generate {
            brief,
            out,
            model,
            temperature,
        } => cmd_generate(&brief, &out, model, temperature),
        Command::Edit {
            instruction,
            project,
        } => cmd_edit(&instruction, &project),
        Command::Tokens { project, set } => cmd_tokens(&project, &set),
        Command::Text {
            project,
            heading,
            subtext,
        } => cmd_text(&project, heading.as_deref(), subtext.as_deref()),
        Command::Image {
            project,
            slot,
            file,
        } => cmd_image(&project, slot, &file),
        Command::Pack { project, out } => cmd_pack(&project, &out),
        Command::Themes => cmd_themes(),
    }
}

// =========================================================================
// Project directory helpers
// =========================================================================

fn read_file(path: &Path) -> String {
    match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error reading {}: {e}", path.display());
            std::process::exit(1);
        }
    }
}

fn load_project(dir: &str) -> Session {
    let dir = Path::new(dir);
    let html = read_file(&dir.join("index.html"));
    let css = read_file(&dir.join("styles.css"));
    Session::new(DesignDocument { html, css })
}

fn save_project(dir: &str, doc: &DesignDocument) {
    let dir = Path::new(dir);
    if let Err(e) = std::fs::create_dir_all(dir) {
        eprintln!("Error creating {}: {e}", dir.display());
        std::process::exit(1);
    }
    for (name, contents) in [("index.html", &doc.html), ("styles.css", &doc.css)] {
        let path = dir.join(name);
        if let Err(e) = std::fs::write(&path, contents) {
            eprintln!("Error writing {}: {e}", path.display());
            std::process::exit(1);
        }
    }
}

fn client_from_env(model: Option<String>, temperature: Option<f32>) -> GenerationClient {
    // Built before any file is touched, so a missing key fails first.
    let client = match GenerationClient::from_env() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    let client = match model {
        Some(model) => client.with_model(model),
        None => client,
    };
    match temperature {
        Some(t) => client.with_temperature(t),
        None => client,
    }
}

// =========================================================================
// Commands
// =========================================================================

fn cmd_generate(brief_path: &str, out: &str, model: Option<String>, temperature: Option<f32>) {
    let client = client_from_env(model, temperature);

    let brief: SiteBrief = match toml::from_str(&read_file(Path::new(brief_path))) {
        Ok(brief) => brief,
        Err(e) => {
            eprintln!("Error in brief {brief_path}: {e}");
            std::process::exit(1);
        }
    };

    let session = match generate_session(&client, &brief) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Generation failed: {e}");
            std::process::exit(1);
        }
    };

    save_project(out, session.document());
    eprintln!(
        "Generated: {out}/index.html ({} image slot(s))",
        session.slots().len()
    );
}

fn cmd_edit(instruction: &str, project: &str) {
    let client = client_from_env(None, None);
    let mut session = load_project(project);

    match edit_session(&mut session, &client, instruction) {
        Ok(true) => {
            save_project(project, session.document());
            eprintln!(
                "Edited: {project} ({} image slot(s) remain)",
                session.slots().len()
            );
        }
        Ok(false) => eprintln!("No change: the service returned blank fields."),
        Err(e) => {
            // The project files are untouched on failure.
            eprintln!("Edit failed: {e}");
            std::process::exit(1);
        }
    }
}

fn cmd_tokens(project: &str, set: &[String]) {
    let mut session = load_project(project);

    if set.is_empty() {
        let tokens = session.tokens();
        if tokens.is_empty() {
            eprintln!("No design tokens found (missing :root block).");
            return;
        }
        for (name, value) in tokens.iter() {
            println!("{name}: {value}");
        }
        return;
    }

    let mut updates = TokenSet::new();
    for entry in set {
        match entry.split_once('=') {
            Some((name, value)) if !name.trim().is_empty() => {
                updates.insert(name.trim(), value.trim());
            }
            _ => {
                eprintln!("Error: --set expects NAME=VALUE, got '{entry}'");
                std::process::exit(1);
            }
        }
    }
    session.apply_tokens(&updates);
    save_project(project, session.document());
    eprintln!("Updated {} token(s).", updates.len());
}

fn cmd_text(project: &str, heading: Option<&str>, subtext: Option<&str>) {
    if heading.is_none() && subtext.is_none() {
        eprintln!("Nothing to do: pass --heading and/or --subtext.");
        std::process::exit(1);
    }

    let mut session = load_project(project);
    if let Some(text) = heading {
        if !session.set_heading(text) {
            eprintln!("No <h1> found; heading left unchanged.");
        }
    }
    if let Some(text) = subtext {
        if !session.set_subtext(text) {
            eprintln!("No .sub/.lead block found; subtext left unchanged.");
        }
    }
    save_project(project, session.document());
    eprintln!("Text updated: {project}");
}

fn cmd_image(project: &str, slot: usize, file: &str) {
    if slot == 0 {
        eprintln!("Error: slots are numbered from 1.");
        std::process::exit(1);
    }

    let path = Path::new(file);
    let Some(mime) = mime_for_upload(path) else {
        eprintln!("Error: unsupported image type (accepted: png, jpg, jpeg, webp): {file}");
        std::process::exit(1);
    };
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("Error reading {file}: {e}");
            std::process::exit(1);
        }
    };

    let mut session = load_project(project);
    let total = session.slots().len();
    if !session.replace_image(slot - 1, &data_uri(mime, &bytes)) {
        eprintln!("Error: no image slot {slot} (found {total}).");
        std::process::exit(1);
    }

    save_project(project, session.document());
    eprintln!(
        "Replaced slot {slot}; {} slot(s) remain.",
        session.slots().len()
    );
}

fn cmd_pack(project: &str, out: &str) {
    let dir = Path::new(project);
    let html = read_file(&dir.join("index.html"));
    let css = read_file(&dir.join("styles.css"));

    let bytes = match package(&html, &css) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("Packaging failed: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = std::fs::write(out, bytes) {
        eprintln!("Error writing {out}: {e}");
        std::process::exit(1);
    }
    eprintln!("Packed: {out}");
}

fn cmd_themes() {
    for theme in THEMES {
        println!("{theme}");
    }
}
