// src/main.rs

use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Parser;
use log::info;

use oscsim::simulation::csv::write_run_csv;
use oscsim::simulation::framework::{execute_scenario, override_scheme, single_run_scenario};
use oscsim::simulation::load_parameters::{load_scenario, load_simulation_parameters};
use oscsim::{GridRule, Scheme};

#[derive(Parser, Debug)]
struct Args {
    /// シナリオファイル
    #[arg(short, long, default_value = "config/scenario.yaml")]
    config: PathBuf,

    /// 単体パラメータファイル (指定時はシナリオの代わりに1件だけ実行)
    #[arg(short, long, conflicts_with = "config")]
    parameters: Option<PathBuf>,

    /// CSVの出力先ディレクトリ
    #[arg(short, long, default_value = "output")]
    output: PathBuf,

    /// 全実行の積分スキームを上書き (forward_euler, semi_implicit_euler, stormer_verlet)
    #[arg(short, long)]
    scheme: Option<Scheme>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    // シナリオの読み込み
    let mut scenario = match &args.parameters {
        Some(path) => {
            let params = load_simulation_parameters(path)?;
            let name = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or("run");
            let scheme = args.scheme.unwrap_or(Scheme::ForwardEuler);
            single_run_scenario(name, scheme, params, GridRule::Uniform)
        }
        None => load_scenario(&args.config)?,
    };
    if let Some(scheme) = args.scheme {
        scenario = override_scheme(scenario, scheme);
    }

    let results = execute_scenario(&scenario)?;

    // CSV出力
    fs::create_dir_all(&args.output)?;
    for result in &results {
        let path = args.output.join(format!("{}.csv", result.name));
        write_run_csv(&path, result)?;
        info!("{} を書き出しました", path.display());
    }

    Ok(())
}
