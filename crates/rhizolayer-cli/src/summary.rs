use console::Style;
use rhizolayer_core::pipeline::config::PipelineConfig;
use rhizolayer_core::pipeline::PipelineOutput;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    warning: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            warning: Style::new().yellow().bold(),
            path: Style::new().underlined(),
        }
    }
}

fn rule(s: &Styles, len: usize) {
    println!("  {}", s.title.apply_to("\u{2550}".repeat(len)));
}

pub fn print_pipeline_summary(config: &PipelineConfig) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Rhizolayer Pipeline"));
    rule(&s, 19);
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Images"),
        s.path.apply_to(config.image_folder.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Masks"),
        s.path.apply_to(config.seg_folder.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(config.output.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Grouping"),
        s.method.apply_to(&config.grouping)
    );
    println!();

    println!("  {}", s.header.apply_to("Boundary"));
    println!(
        "    {:<16}{}",
        s.label.apply_to("Strip"),
        s.value.apply_to(format!(
            "{}..{} px from right",
            config.boundary.strip_far_offset, config.boundary.strip_near_offset
        ))
    );
    println!(
        "    {:<16}{}",
        s.label.apply_to("Excluded rows"),
        s.value.apply_to(format!(
            "top {}, bottom {}",
            config.boundary.exclude_top, config.boundary.exclude_bottom
        ))
    );
    println!(
        "    {:<16}{}",
        s.label.apply_to("Polarity"),
        s.method.apply_to(config.boundary.polarity)
    );
    println!();

    println!("  {}", s.header.apply_to("Traits"));
    println!(
        "    {:<16}{}",
        s.label.apply_to("Area margin"),
        s.value.apply_to(format!("{} px", config.traits.threshold_area))
    );
    println!(
        "    {:<16}{}",
        s.label.apply_to("Count band"),
        s.value.apply_to(format!("{} px", config.traits.threshold_count))
    );
    println!();

    println!("  {}", s.header.apply_to("Filtering"));
    println!(
        "    {:<16}{}",
        s.label.apply_to("Zero bottom"),
        s.value.apply_to(format!(
            "< {:.0}% removed",
            config.frame_filter.zero_bottom_threshold * 100.0
        ))
    );
    println!(
        "    {:<16}{}",
        s.label.apply_to("Frame |z|"),
        s.value.apply_to(format!(
            "<= {} ({})",
            config.frame_filter.z_score_threshold, config.frame_filter.combination
        ))
    );
    println!(
        "    {:<16}{}",
        s.label.apply_to("Plant |z|"),
        s.value.apply_to(format!(
            "<= {} ({})",
            config.plant_filter.z_score_threshold, config.plant_filter.combination
        ))
    );
    println!();
}

pub fn print_run_summary(output: &PipelineOutput) {
    let s = Styles::new();
    let frames = &output.frames;
    let plants = &output.plants;

    println!();
    println!("  {}", s.header.apply_to("Frames"));
    let rows = [
        ("Measured", output.traits.len()),
        ("Zero upper", frames.zero_upper.removed.len()),
        ("Zero bottom", frames.zero_bottom.removed.len()),
        ("Invalid ratio", frames.ratios.removed.len()),
        ("Count outliers", frames.views.count.removed.len()),
        ("Area outliers", frames.views.area.removed.len()),
    ];
    for (label, n) in rows {
        println!("    {:<16}{}", s.label.apply_to(label), s.value.apply_to(n));
    }
    println!();

    println!("  {}", s.header.apply_to("Plants"));
    let rows = [
        ("Summarized", frames.summary.len()),
        ("Count outliers", plants.views.count.removed.len()),
        ("Area outliers", plants.views.area.removed.len()),
        ("Groups", plants.group_summary.len()),
    ];
    for (label, n) in rows {
        println!("    {:<16}{}", s.label.apply_to(label), s.value.apply_to(n));
    }
    if !output.unmatched_plants.is_empty() {
        println!(
            "    {:<16}{}",
            s.label.apply_to("Ungrouped"),
            s.warning.apply_to(format!(
                "{} ({})",
                output.unmatched_plants.len(),
                output.unmatched_plants.join(", ")
            ))
        );
    }
    println!();
}
