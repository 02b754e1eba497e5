use std::path::PathBuf;

use argh::FromArgs;

use fragtex::{imgproc::padding::BorderMode, run_batch, ConfigLayer};

#[derive(FromArgs, Debug)]
/// Apply a Gabor texture filter to every fragment image of a directory.
struct Args {
    /// directory containing the fragment images
    #[argh(option, short = 'i')]
    root_dir: Option<PathBuf>,

    /// path to a JSON config file, overridden by the flags below
    #[argh(option, short = 'c')]
    config: Option<PathBuf>,

    /// side length of the gabor kernel, must be odd [default: 31]
    #[argh(option)]
    ksize: Option<usize>,

    /// standard deviation of the gaussian envelope [default: 5.0]
    #[argh(option)]
    sigma: Option<f64>,

    /// orientation of the filter in radians [default: pi/4]
    #[argh(option)]
    theta: Option<f64>,

    /// wavelength of the sinusoid in pixels [default: 10.0]
    #[argh(option)]
    lambda: Option<f64>,

    /// spatial aspect ratio of the envelope [default: 0.5]
    #[argh(option)]
    gamma: Option<f64>,

    /// file name pattern of the inputs [default: frag_eroded_*.ppm]
    #[argh(option)]
    pattern: Option<String>,

    /// name of the output directory under the root [default: textures_traitees]
    #[argh(option)]
    output_dir: Option<String>,

    /// prefix of the output file names [default: texture_]
    #[argh(option)]
    output_prefix: Option<String>,

    /// border mode: reflect101, replicate or constant [default: reflect101]
    #[argh(option)]
    border: Option<BorderMode>,
}

impl Args {
    fn layers(self) -> Result<ConfigLayer, fragtex::ConfigError> {
        let file_layer = match &self.config {
            Some(path) => ConfigLayer::from_json_file(path)?,
            None => ConfigLayer::default(),
        };

        let cli_layer = ConfigLayer {
            root_dir: self.root_dir,
            ksize: self.ksize,
            sigma: self.sigma,
            theta: self.theta,
            lambda: self.lambda,
            gamma: self.gamma,
            pattern: self.pattern,
            output_dir: self.output_dir,
            output_prefix: self.output_prefix,
            border: self.border,
        };

        Ok(file_layer.merge(cli_layer))
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Args = argh::from_env();
    let config = args.layers()?.resolve()?;

    run_batch(&config);

    Ok(())
}
