#![allow(clippy::uninlined_format_args)]

use comfy_table::{
    Cell, CellAlignment, ContentArrangement, Table,
    modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL,
};
use fnv_bloom::{
    BloomFilterConfigBuilder, BloomParams, common::bytes2hr, prefetch,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let capacities = [1_000, 100_000, 1_000_000, 100_000_000];
    let target_fprs = [0.01, 1e-3, 1e-6, 1e-9];
    let pinned_hashes = [None, Some(4)];

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Capacity").set_alignment(CellAlignment::Center),
            Cell::new("Target FPR").set_alignment(CellAlignment::Center),
            Cell::new("k").set_alignment(CellAlignment::Center),
            Cell::new("Bits (m)").set_alignment(CellAlignment::Center),
            Cell::new("Bits / element").set_alignment(CellAlignment::Center),
            Cell::new("Memory").set_alignment(CellAlignment::Center),
        ]);

    for &capacity in &capacities {
        for &target_fpr in &target_fprs {
            for &hashes in &pinned_hashes {
                let mut builder = BloomFilterConfigBuilder::default()
                    .capacity(capacity)
                    .false_positive_rate(target_fpr);
                if let Some(k) = hashes {
                    builder = builder.num_hashes(k);
                }
                let params = BloomParams::try_from(&builder.build()?)?;
                let bits = params.bit_vector_size.div_ceil(8) * 8;

                table.add_row(vec![
                    Cell::new(format!("{}", capacity)),
                    Cell::new(format!("{:e}", target_fpr)),
                    Cell::new(match hashes {
                        Some(k) => format!("{} (pinned)", k),
                        None => format!("{}", params.num_hashes),
                    }),
                    Cell::new(format!("{}", bits)),
                    Cell::new(format!("{:.2}", bits as f64 / capacity as f64)),
                    Cell::new(bytes2hr(bits / 8)),
                ]);
            }
        }
    }

    println!("{}", table);
    println!(
        "\nPrefetch hint on this target: {}",
        if prefetch::SUPPORTED { "yes" } else { "no" }
    );

    Ok(())
}
