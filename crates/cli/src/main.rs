use anyhow::{anyhow, bail, Context};
use config::{Config, File};
use hexmap::{
    timed, HexMap, MapConfig, MapRenderer, MapResources, RenderConfig, Seed,
    TerrainTier,
};
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
    process,
};
use structopt::StructOpt;
use strum::{Display, EnumString};

/// CLI for generating hexagonal tile maps.
#[derive(Debug, StructOpt)]
#[structopt(name = "hexmap")]
struct Opt {
    /// Path to a config file that defines the map to be generated. Supported
    /// formats: JSON, TOML. If neither this nor --input is given, the default
    /// config is used.
    #[structopt(short, long)]
    config: Option<PathBuf>,

    /// Path to an existing .json map file to load, instead of generating a
    /// new map
    #[structopt(short, long)]
    input: Option<PathBuf>,

    /// Override the seed from the config. Integers are used as-is, any other
    /// text is hashed into a seed.
    #[structopt(short, long)]
    seed: Option<String>,

    /// If given, the generated map will be saved to this directory. The exact
    /// files that appear in the directory are defined by the output formats.
    /// See `--output-formats` for more info
    #[structopt(short, long)]
    output: Option<PathBuf>,

    /// The format(s) to output the map in. Supported formats:
    ///
    /// cfg - The full config object used for the map, in TOML format
    ///
    /// json - JSON representation of the generated map. Can be reloaded with
    ///   `--input`
    ///
    /// svg - 2D top-down rendering of the map
    ///
    /// stl - 3D rendering of the map
    #[structopt(short = "f", long)]
    output_formats: Vec<OutputFormat>,

    /// Only render tiles (and decorations) of this tier. Only relevant for
    /// rendered output formats, such as SVG and STL.
    #[structopt(long)]
    tier: Option<TerrainTier>,

    /// Hide rocks and trees? Only relevant for SVG output.
    #[structopt(long)]
    hide_decorations: bool,

    /// Leave out the water and clouds? Only relevant for rendered output
    /// formats, such as SVG and STL.
    #[structopt(long)]
    hide_scenery: bool,

    /// Vertical scale applied to 3D output
    #[structopt(long, default_value = "1.0")]
    vertical_scale: f64,

    /// The logging level to use during map generation. See
    /// https://docs.rs/log/0.4/log/enum.LevelFilter.html for options
    #[structopt(long, default_value = "info")]
    log_level: LevelFilter,
}

/// Different output formats.
#[derive(Copy, Clone, Debug, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
enum OutputFormat {
    // If you change this, make sure to update the help text for
    // `--output-formats`!
    /// Export the map's full config in a human-readable file
    Cfg,
    /// Export the map in a serialized JSON format, which can be deserialized
    /// later to recover the map
    Json,
    /// Render the map as a 2D SVG
    Svg,
    /// Render the map as a 3D STL
    Stl,
    /* If you change this, make sure to update the help text for
     * `--output-formats`! */
}

impl OutputFormat {
    fn file_ext(self) -> &'static str {
        match self {
            Self::Cfg => "toml",
            Self::Json => "json",
            Self::Svg => "svg",
            Self::Stl => "stl",
        }
    }
}

fn load_config(config_path: &Path) -> anyhow::Result<MapConfig> {
    // Load config
    let mut settings = Config::new();
    let config_path = config_path.to_str().ok_or_else(|| {
        anyhow!("invalid character in path {:?}", config_path)
    })?;
    settings
        .merge(File::with_name(config_path))
        .context("error reading config file")?;
    settings.try_into().context("error reading config")
}

fn load_map(input_path: &Path) -> anyhow::Result<HexMap> {
    let json = fs::read_to_string(input_path)
        .with_context(|| format!("error reading map file {:?}", input_path))?;
    let map = HexMap::from_json(&json)?;
    info!("Loaded map from {:?}", input_path);
    Ok(map)
}

/// Generate an output form of the map in the given format.
fn gen_output(
    output_dir: &Path,
    output_format: OutputFormat,
    map: &HexMap,
    renderer: &MapRenderer,
) -> anyhow::Result<()> {
    fn generate_bytes(
        output_format: OutputFormat,
        map: &HexMap,
        renderer: &MapRenderer,
    ) -> anyhow::Result<Vec<u8>> {
        Ok(match output_format {
            OutputFormat::Cfg => {
                // Go through a TOML value first, so that plain values get
                // written before tables regardless of field order
                let value = toml::Value::try_from(map.config())
                    .context("error serializing config")?;
                toml::to_string_pretty(&value)
                    .context("error serializing config")?
                    .into_bytes()
            }
            OutputFormat::Json => {
                // Serialize the entire map via JSON
                map.to_json()?.into_bytes()
            }
            OutputFormat::Svg => {
                // Render the map in 2D
                renderer.render_as_svg(map).into_bytes()
            }
            OutputFormat::Stl => {
                // Render the map in 3D
                renderer.render_as_stl(map)?
            }
        })
    }

    let output_file_path = output_dir
        .join("map")
        .with_extension(output_format.file_ext());

    timed!(
        format!(
            "Generating {} output and writing to {:?}",
            output_format, &output_file_path
        ),
        log::Level::Info,
        {
            let bytes = generate_bytes(output_format, map, renderer)?;
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&output_file_path)
                .with_context(|| {
                    format!("error opening output file {:?}", &output_file_path)
                })?;
            file.write_all(&bytes).with_context(|| {
                format!("error writing to file {:?}", &output_file_path)
            })?;
        }
    );

    Ok(())
}

/// Run the CLI with some options
fn run(opt: Opt) -> anyhow::Result<()> {
    SimpleLogger::new().with_level(opt.log_level).init()?;

    let map = match (&opt.config, &opt.input) {
        (_, None) => {
            // Load map config (if any) and use it to generate a new map
            let mut config = match &opt.config {
                Some(config_path) => load_config(config_path)?,
                None => MapConfig::default(),
            };
            if let Some(seed) = &opt.seed {
                config.seed = Seed::from(seed.as_str());
            }
            let resources = MapResources::load(&config)?;
            HexMap::generate(config, &resources)?
        }
        (None, Some(input_path)) => {
            if opt.seed.is_some() {
                bail!("--seed has no effect when loading a map with --input")
            }
            load_map(input_path)?
        }
        (Some(_), Some(_)) => bail!(
            "must pass at most one of --config (to generate a new map) \
            or --input (to load an existing map)"
        ),
    };

    // If an output dir was specified, write out output format(s) there
    if let Some(output_dir) = &opt.output {
        if opt.output_formats.is_empty() {
            bail!("output dir was specified, but no output formats were given")
        }
        fs::create_dir_all(output_dir)?;

        let renderer = MapRenderer::new(RenderConfig {
            vertical_scale: opt.vertical_scale,
            tier: opt.tier,
            show_decorations: !opt.hide_decorations,
            show_scenery: !opt.hide_scenery,
        })
        .context("invalid render config")?;
        for &output_format in &opt.output_formats {
            gen_output(output_dir, output_format, &map, &renderer)?;
        }
    }

    Ok(())
}

fn main() {
    let exit_code = match run(Opt::from_args()) {
        Ok(_) => 0,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            1
        }
    };
    process::exit(exit_code);
}
