//! CLI application for facial harmony analysis.
//!
//! Usage:
//!   facial-harmony <face.json>                     # Human-readable output
//!   facial-harmony <face.json> --json              # JSON output
//!   facial-harmony <face.json> -o report.json      # Save to file
//!   facial-harmony <face.json> --premium --seed 7  # Premium tips, reproducible

use clap::Parser;
use facial_harmony::{AnalyzerConfig, FaceInput, HarmonyAnalyzer, HarmonyReport, UserProfile};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "facial-harmony")]
#[command(author, version, about = "Facial harmony analysis from face-mesh landmarks", long_about = None)]
struct Args {
    /// Landmark file: {"landmarks": [...], "embedding": [...]} or a bare point array
    #[arg(required = true)]
    input: PathBuf,

    /// Output as JSON
    #[arg(short, long)]
    json: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Analyzer configuration (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Tip catalog, overrides the configured one
    #[arg(long)]
    tips: Option<PathBuf>,

    /// Celebrity catalog, overrides the configured one
    #[arg(long)]
    celebrities: Option<PathBuf>,

    /// Use premium tip limits and tiers
    #[arg(long)]
    premium: bool,

    /// Tip ids the user has already seen
    #[arg(long, num_args = 1..)]
    shown: Vec<String>,

    /// Seed for tip selection
    #[arg(long)]
    seed: Option<u64>,

    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => AnalyzerConfig::load(path)?,
        None => AnalyzerConfig::default(),
    };
    if let Some(path) = &args.tips {
        config.tips_catalog = Some(path.clone());
    }
    if let Some(path) = &args.celebrities {
        config.celebrity_catalog = Some(path.clone());
    }

    let analyzer = HarmonyAnalyzer::from_config(config);

    info!(input = %args.input.display(), "reading landmarks");
    let content = std::fs::read_to_string(&args.input)?;
    let input: FaceInput = serde_json::from_str(&content)?;

    let mut profile = UserProfile::default().with_shown(args.shown.iter().cloned());
    profile.is_premium = args.premium;

    let report = match args.seed {
        Some(seed) => {
            let mut rng = StdRng::seed_from_u64(seed);
            analyzer.analyze_with_rng(&input, &profile, &mut rng)?
        }
        None => analyzer.analyze(&input, &profile)?,
    };

    let output_str = if args.json {
        serde_json::to_string_pretty(&report)?
    } else {
        format_human_readable(&report)
    };

    if let Some(ref path) = args.output {
        std::fs::write(path, &output_str)?;
        info!(path = %path.display(), "report written");
    } else {
        println!("{}", output_str);
    }

    Ok(())
}

fn format_human_readable(report: &HarmonyReport) -> String {
    let mut s = String::new();
    let score = &report.score;

    s.push_str(&format!(
        "Harmony score: {:.1} ({})\n",
        score.total_score, score.category
    ));
    s.push_str(&format!(
        "Pose: frontal ratio {:.2}, roll {:.1} deg\n",
        report.frontal_ratio, report.roll_degrees
    ));

    s.push_str("\nComponents:\n");
    for (name, value) in score.components.iter() {
        s.push_str(&format!("  {:<10} {:.1}\n", format!("{}:", name), value));
    }

    let details = &report.symmetry.details;
    s.push_str(&format!("\nSymmetry: {:.1}\n", report.symmetry.score));
    s.push_str(&format!(
        "  Eyes {:.1}, Jaw {:.1}, Brows {:.1}, Lips {:.1}\n",
        details.eyes, details.jaw, details.brows, details.lips
    ));
    if report.symmetry.has_asymmetry() {
        let zones: Vec<String> = report
            .symmetry
            .asymmetry_zones
            .iter()
            .map(|zone| zone.to_string())
            .collect();
        s.push_str(&format!("  Asymmetric: {}\n", zones.join(", ")));
    }

    let shape = &report.shape;
    s.push_str(&format!(
        "\nFace shape: {} (also {}, {})\n",
        shape.primary, shape.shapes[1], shape.shapes[2]
    ));
    s.push_str(&format!(
        "  Width/Height: {:.2}  Jaw/Cheek: {:.2}  Forehead/Cheek: {:.2}\n",
        shape.ratios.width_height, shape.ratios.jaw_cheek, shape.ratios.forehead_cheek
    ));

    if report.tips.is_empty() {
        s.push_str("\nNo tips available.\n");
    } else {
        s.push_str("\nTips:\n");
        for tip in &report.tips {
            s.push_str(&format!("  - {}\n", tip.text));
        }
    }

    if !report.celebrity_matches.is_empty() {
        s.push_str("\nCelebrity matches:\n");
        for m in &report.celebrity_matches {
            let features: Vec<&str> = m.similar_features.iter().map(|f| f.label()).collect();
            s.push_str(&format!(
                "  {:>3}%  {} ({})\n",
                m.resemblance_score,
                m.name,
                features.join(", ")
            ));
        }
    }

    s
}
