use std::path::Path;

use qdim_core::{Design, simulate_design};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::ModelArgs;

pub fn run(
    model_args: &ModelArgs,
    design_path: &str,
    seed: Option<u64>,
    output_path: Option<&str>,
) {
    let model = super::or_exit(super::build_model(model_args));
    let config = super::prediction_config(model_args);
    let designs: Vec<Design> = super::or_exit(super::read_json(Path::new(design_path)));
    log::info!("simulating {} conditions from {design_path}", designs.len());

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let conditions = super::or_exit(simulate_design(&model, &designs, &config, &mut rng));

    match output_path {
        Some(path) => {
            super::or_exit(super::write_json(Path::new(path), &conditions));
            eprintln!("Wrote {} conditions to {path}", conditions.len());
        }
        None => println!("{}", super::or_exit(serde_json::to_string_pretty(&conditions))),
    }
}
