use plotters::prelude::*;

/// Asserts that a numerical value is in the interval `[a,b]` and panics with
/// a helpful message if not.
#[macro_export]
macro_rules! assert_interval {
    ($var:expr, $a:expr, $b:expr) => {
        assert!(
            $var >= $a && $var <= $b,
            "Invalid value for `{}`. Must be in the interval [{}, {}].",
            stringify!($var),
            $a,
            $b,
        );
    };
}

/// Index of the first maximum.
#[inline(always)]
pub fn argmax<T: PartialOrd>(values: impl Iterator<Item = T>) -> usize {
    let mut best_index = 0;
    let mut best: Option<T> = None;
    for (i, value) in values.enumerate() {
        let is_better = match &best {
            Some(current) => value > *current,
            None => true,
        };
        if is_better {
            best = Some(value);
            best_index = i;
        }
    }
    best_index
}

#[inline(always)]
pub fn max(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(f64::NEG_INFINITY, f64::max)
}

pub fn moving_average(window: usize, vector: &[f64]) -> Vec<f64> {
    let window = window.max(1);
    let mut aux: usize = 0;
    let mut result: Vec<f64> = vec![];
    while aux < vector.len() {
        let end: usize = if aux + window < vector.len() {
            aux + window
        } else {
            vector.len()
        };
        let slice: &[f64] = &vector[aux..end];
        let r: f64 = slice.iter().sum();
        result.push(r / slice.len() as f64);
        aux = end;
    }
    result
}

/// Draws every series as a line plot and writes `{title}.png` in the current
/// directory.
pub fn plot_moving_average(
    data: &[Vec<f64>],
    colors: &[&'static RGBColor],
    legends: &[&str],
    title: &str,
) {
    let filename = format!("{}.png", title.to_lowercase().replace(' ', "_"));
    let root = BitMapBackend::new(&filename, (1024, 768)).into_drawing_area();
    root.fill(&WHITE).unwrap();

    let max_len = data.iter().map(|series| series.len()).max().unwrap_or(0);
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for series in data {
        for &v in series {
            min_y = min_y.min(v);
            max_y = max_y.max(v);
        }
    }
    if max_len == 0 || !min_y.is_finite() || !max_y.is_finite() {
        return;
    }

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0..max_len, min_y..max_y)
        .unwrap();
    chart.configure_mesh().draw().unwrap();

    for (i, series) in data.iter().enumerate() {
        let color = colors[i % colors.len()];
        chart
            .draw_series(LineSeries::new(series.iter().copied().enumerate(), color))
            .unwrap()
            .label(legends[i])
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }
    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .unwrap();
    root.present().unwrap();
}
