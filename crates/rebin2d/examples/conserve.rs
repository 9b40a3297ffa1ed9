//! Demonstrates signal conservation under rebinning.
//!
//! Builds a Gaussian-ish blob on a fine grid, rebins onto misaligned coarse
//! boundaries, and prints the total signal before and after.

use rebin2d::{rebin, InputGrid, RebinCfg, RowEdges};

fn main() -> Result<(), rebin2d::RebinError> {
    tracing_subscriber::fmt().init();

    let n = 64usize;
    let edges: Vec<f64> = (0..=n).map(|i| i as f64 / n as f64 * 10.0).collect();
    let center = 5.0;
    let signal: Vec<Vec<f64>> = (0..n)
        .map(|r| {
            (0..n)
                .map(|c| {
                    let x = 0.5 * (edges[c] + edges[c + 1]) - center;
                    let y = 0.5 * (edges[r] + edges[r + 1]) - center;
                    1000.0 * (-(x * x + y * y) / 4.0).exp()
                })
                .collect()
        })
        .collect();
    let variance = signal.clone();
    let input = InputGrid::new(
        RowEdges::Shared(edges.clone()),
        edges,
        signal,
        variance,
        false,
    )?;
    let total_in: f64 = (0..n).map(|r| input.signal(r).iter().sum::<f64>()).sum();

    // Coarse boundaries deliberately misaligned with the fine grid.
    let coarse: Vec<f64> = (0..=13).map(|i| -0.35 + i as f64 * 0.83).collect();
    let out = rebin(&input, &coarse, &coarse, &RebinCfg::default())?;
    let total_out: f64 = out.signal.iter().sum();

    println!("total in : {total_in:.6}");
    println!("total out: {total_out:.6}");
    println!("relative difference: {:.3e}", (total_out - total_in).abs() / total_in);
    Ok(())
}
