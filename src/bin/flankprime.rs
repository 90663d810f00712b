use anyhow::Result;
use clap::Parser;
use log::{error, info, Level};
use simple_logger::init_with_level;

use flankprime::cli::Args;
use flankprime::pipeline::Pipeline;
use flankprime::primer3::Primer3Core;
use flankprime::report::{timestamped_path, Report, SkipList};

fn main() {
    let start = std::time::Instant::now();
    let args = Args::parse();
    init_with_level(if args.verbose { Level::Debug } else { Level::Info }).unwrap();

    args.check().unwrap_or_else(|e| {
        error!("{}", e);
        std::process::exit(1);
    });

    run(args).unwrap_or_else(|e| {
        error!("{:#}", e);
        std::process::exit(1);
    });

    info!("Elapsed time: {:?}", start.elapsed());
}

fn run(args: Args) -> Result<()> {
    let mode = args.run_mode();
    let now = chrono::Local::now();
    let table = timestamped_path(&args.outdir, mode.table_stem(), "csv", &now);
    let mut skips = mode.sidecar_stem().map(|stem| SkipList::new(timestamped_path(&args.outdir, stem, "txt", &now)));

    info!("flankprime {} ({mode}) -> {}", flankprime::VERSION, table.display());
    let mut report = Report::create(&table, mode)?;
    let designer = Primer3Core { executable: args.primer3.clone(), thermo_params: args.thermo_params.clone() };
    let mut pipeline = Pipeline::new(mode, args.settings(), designer);

    let stats = pipeline.run(&args.input, &mut report, skips.as_mut())?;
    info!(
        "{} gene(s): {} designed, {} row(s), {} skipped for bsaI, {} without CDS",
        stats.genes, stats.designed, stats.rows, stats.skipped_bsai, stats.skipped_no_cds
    );
    if let Some(s) = skips.as_ref().filter(|s| !s.ids().is_empty()) {
        info!("bsaI genes listed in {}", s.path().display());
    }

    std::env::set_var("POLARS_FMT_TABLE_FORMATTING", "UTF8_FULL");
    std::env::set_var("POLARS_FMT_MAX_ROWS", "1000000");
    println!("{}", report.summary_frame()?);
    Ok(())
}
