use anyhow::anyhow;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "Rust multi-goal grid search",
    about = "Minimum-cost landmark tours on obstacle grids, found with A* and an MST heuristic.",
    version = "0.1"
)]
pub struct Cli {
    #[arg(
        long,
        help = "Path to the YAML scenario file",
        default_value = "scenarios/demo.yaml"
    )]
    pub scenario_path: String,

    #[arg(
        long,
        help = "Seed for the random number generator",
        default_value_t = 0
    )]
    pub seed: usize,

    #[arg(
        long,
        help = "Override the scenario start cell, as `x,y`",
        use_value_delimiter = true
    )]
    pub start: Vec<usize>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub scenario_path: String,
    pub seed: usize,
    pub start: Vec<usize>,
}

impl Config {
    pub fn new(cli: &Cli) -> Self {
        Self {
            scenario_path: cli.scenario_path.clone(),
            seed: cli.seed,
            start: cli.start.clone(),
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.start.is_empty() && self.start.len() != 2 {
            return Err(anyhow!(
                "start override must be two coordinates `x,y`, got {:?}",
                self.start
            ));
        }
        Ok(())
    }

    pub fn start_override(&self) -> Option<[usize; 2]> {
        match self.start.as_slice() {
            &[x, y] => Some([x, y]),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_override_validation() {
        let config = Config {
            scenario_path: String::new(),
            seed: 0,
            start: vec![3],
        };
        assert!(config.validate().is_err());

        let config = Config {
            scenario_path: String::new(),
            seed: 0,
            start: vec![3, 5],
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.start_override(), Some([3, 5]));
    }
}
