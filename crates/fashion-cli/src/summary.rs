use console::Style;
use fashion_core::pipeline::Classification;

const BAR_WIDTH: usize = 30;

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    top: Style,
    bar: Style,
    empty: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            top: Style::new().green().bold(),
            bar: Style::new().green(),
            empty: Style::new().dim(),
            path: Style::new().underlined(),
        }
    }
}

fn bar(fraction: f32) -> (String, String) {
    let filled = (fraction * BAR_WIDTH as f32).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    (
        "\u{2588}".repeat(filled),
        "\u{2591}".repeat(BAR_WIDTH - filled),
    )
}

pub fn print_predictions(classification: &Classification) {
    let s = Styles::new();
    let original = &classification.original;
    let processed = &classification.processed.preprocessed;
    let top = classification.top().map(|p| p.label);

    println!();
    println!("  {}", s.title.apply_to("Fashion MNIST Classifier"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(24)));
    println!();
    println!(
        "  {:<14}{}",
        s.label.apply_to("Image"),
        s.path.apply_to(&original.name)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Size"),
        s.value
            .apply_to(format!("{}x{}", original.width(), original.height()))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Mean"),
        s.value.apply_to(format!("{:.4}", processed.mean))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Inverted"),
        s.value
            .apply_to(if processed.inverted { "yes" } else { "no" })
    );
    println!();

    for prediction in &classification.predictions {
        let (filled, empty) = bar(prediction.fill_fraction());
        let is_top = Some(prediction.label) == top;
        let label = format!("{:<12}", prediction.label);
        let marker = if is_top { "\u{25c0}" } else { "" };
        println!(
            "  {}  {}  {}{} {}",
            if is_top {
                s.top.apply_to(label)
            } else {
                s.value.apply_to(label)
            },
            s.value.apply_to(prediction.formatted()),
            s.bar.apply_to(filled),
            s.empty.apply_to(empty),
            s.top.apply_to(marker),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_widths() {
        let (filled, empty) = bar(0.5);
        assert_eq!(filled.chars().count(), 15);
        assert_eq!(empty.chars().count(), 15);

        let (filled, empty) = bar(1.0);
        assert_eq!(filled.chars().count(), BAR_WIDTH);
        assert!(empty.is_empty());

        let (filled, _) = bar(0.0);
        assert!(filled.is_empty());
    }
}
