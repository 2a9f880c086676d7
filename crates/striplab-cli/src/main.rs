use clap::{Parser, Subcommand};
use std::path::PathBuf;
use striplab_cli::commands::{
    cmd_analyze, cmd_batch, cmd_profile_init, cmd_profile_list, cmd_profile_set_curve,
    cmd_profile_set_thresholds, cmd_profile_show,
};

#[derive(Parser)]
#[command(name = "striplab")]
#[command(version, about = "Reagent-strip colorimetric analysis", long_about = None)]
struct Cli {
    /// Print diagnostic output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one strip photograph
    Analyze {
        /// Input image (PNG or JPEG)
        #[arg(value_name = "IMAGE")]
        input: PathBuf,

        /// Calibration profile file
        #[arg(short, long, value_name = "FILE")]
        profile: Option<PathBuf>,

        /// Analysis mode: default, customize or scientific
        #[arg(long, value_name = "MODE")]
        mode: Option<String>,

        /// Subtract an estimated background tint before sampling
        #[arg(long)]
        normalize: bool,

        /// Sample points as "x,y;x,y;..." (auto-placed when omitted)
        #[arg(long, value_name = "POINTS")]
        points: Option<String>,

        /// Background reference patch center as "x,y"
        #[arg(long, value_name = "X,Y")]
        background_point: Option<String>,

        /// Print results as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Analyze many images in parallel
    Batch {
        /// Input files or directories
        #[arg(value_name = "INPUT", required = true)]
        inputs: Vec<PathBuf>,

        /// Calibration profile file
        #[arg(short, long, value_name = "FILE")]
        profile: Option<PathBuf>,

        /// Analysis mode: default, customize or scientific
        #[arg(long, value_name = "MODE")]
        mode: Option<String>,

        /// Subtract an estimated background tint before sampling
        #[arg(long)]
        normalize: bool,

        /// Output directory for result JSON files
        #[arg(short, long, value_name = "DIR")]
        out: Option<PathBuf>,

        /// Number of parallel threads
        #[arg(short = 'j', long, value_name = "N")]
        threads: Option<usize>,
    },

    /// Manage calibration profiles
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
}

#[derive(Subcommand)]
enum ProfileCommands {
    /// List available profiles
    List {
        /// Profiles directory (defaults to the user profile store)
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,
    },

    /// Show a profile's analytes, curves and thresholds
    Show {
        /// Profile file path or name in the profile store
        #[arg(value_name = "PROFILE")]
        profile: String,
    },

    /// Write the built-in Default profile as a starting point
    Init {
        /// Output file (defaults to default.yml in the profile store)
        #[arg(short, long, value_name = "FILE")]
        out: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Replace one analyte's calibration curve
    SetCurve {
        /// Profile file to edit
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Analyte key (e.g. "acephate")
        #[arg(value_name = "ANALYTE")]
        analyte: String,

        /// Points as "concentration:rgb_sum;..." (e.g. "0.0:359;0.3:337;1.0:311")
        #[arg(value_name = "POINTS")]
        points: String,
    },

    /// Replace one analyte's threshold bands
    SetThresholds {
        /// Profile file to edit
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Analyte key (e.g. "acephate")
        #[arg(value_name = "ANALYTE")]
        analyte: String,

        /// Low band as "min,max"
        #[arg(long, value_name = "MIN,MAX")]
        low: Option<String>,

        /// Medium band as "min,max"
        #[arg(long, value_name = "MIN,MAX")]
        medium: Option<String>,

        /// High band as "min,max"
        #[arg(long, value_name = "MIN,MAX")]
        high: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    striplab_core::config::set_verbose(cli.verbose);

    let result = match cli.command {
        Commands::Analyze {
            input,
            profile,
            mode,
            normalize,
            points,
            background_point,
            json,
        } => cmd_analyze(input, profile, mode, normalize, points, background_point, json),

        Commands::Batch {
            inputs,
            profile,
            mode,
            normalize,
            out,
            threads,
        } => cmd_batch(inputs, profile, mode, normalize, out, threads),

        Commands::Profile { command } => match command {
            ProfileCommands::List { dir } => cmd_profile_list(dir),
            ProfileCommands::Show { profile } => cmd_profile_show(profile),
            ProfileCommands::Init { out, force } => cmd_profile_init(out, force),
            ProfileCommands::SetCurve {
                file,
                analyte,
                points,
            } => cmd_profile_set_curve(file, analyte, points),
            ProfileCommands::SetThresholds {
                file,
                analyte,
                low,
                medium,
                high,
            } => cmd_profile_set_thresholds(file, analyte, low, medium, high),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
