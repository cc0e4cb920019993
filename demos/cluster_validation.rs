use accord::{min_max_normalize, Experiment, Sample};

fn fmt(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.7}"),
        None => "undefined".to_string(),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Minimal end-to-end: labeled blobs -> normalize -> repeated k-means ->
    // external validation report.
    //
    // Three blobs on a line, labeled 1/2/3; the clustering never sees the
    // labels, only the validation step does.
    let raw: &[(&[f64], i64)] = &[
        (&[0.0, 0.2], 1),
        (&[0.4, 0.0], 1),
        (&[0.2, 0.5], 1),
        (&[10.0, 0.1], 2),
        (&[10.3, 0.4], 2),
        (&[10.1, 0.0], 2),
        (&[20.2, 0.3], 3),
        (&[20.0, 0.0], 3),
        (&[20.4, 0.2], 3),
    ];
    let mut samples: Vec<Sample> = raw
        .iter()
        .map(|(coords, label)| Sample::new(coords.to_vec(), *label))
        .collect();

    min_max_normalize(&mut samples)?;

    let report = Experiment::new(3)
        .with_max_iter(100)
        .with_threshold(1e-4)
        .with_runs(5)
        .with_seed(42)
        .run(&samples)?;

    for r in &report.records {
        println!(
            "run {}: iterations={} converged={} degenerate={} sse={:.7} rand={} jaccard={} fowlkes={}",
            r.run,
            r.iterations,
            r.converged,
            r.degenerate,
            r.sse,
            fmt(r.rand_index),
            fmt(r.jaccard),
            fmt(r.fowlkes_mallows),
        );
    }

    if let Some((run, sse)) = report.best_sse() {
        println!("Lowest SSE at run {run}: {sse:.7}");
    }
    if let Some((run, value)) = report.best_rand_index() {
        println!("Highest Rand Index at run {run}: {value:.7}");
    }
    if let Some((run, value)) = report.best_jaccard() {
        println!("Highest Jaccard Coefficient at run {run}: {value:.7}");
    }
    if let Some((run, value)) = report.best_fowlkes_mallows() {
        println!("Highest Fowlkes-Mallows Index at run {run}: {value:.7}");
    }

    Ok(())
}
