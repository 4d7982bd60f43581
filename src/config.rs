use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    #[arg(long, default_value_t = 20)]
    pub width: usize,

    #[arg(long, default_value_t = 20)]
    pub height: usize,

    #[arg(long, default_value_t = 50)]
    pub num_walls: usize,

    /// One of: lpa_star, d_star_lite, all
    #[arg(long, default_value = "d_star_lite")]
    pub algorithm: String,

    /// Reproducible maze generation when set
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, default_value_t = false)]
    pub quiet: bool,
}
