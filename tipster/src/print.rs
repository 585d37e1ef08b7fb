use stanza::style::{HAlign, Header, MinWidth, Separator, Styles};
use stanza::table::{Col, Row, Table};

use crate::domain::{BoxPlot, ResultFrequency, TableRow};

pub fn tabulate_table(rows: &[TableRow]) -> Table {
    let mut table = Table::default()
        .with_cols({
            let mut cols = vec![
                Col::new(Styles::default().with(MinWidth(5)).with(HAlign::Right)),
                Col::new(
                    Styles::default()
                        .with(Separator(true))
                        .with(MinWidth(16))
                        .with(HAlign::Left),
                ),
            ];
            for _ in 0..6 {
                cols.push(Col::new(
                    Styles::default().with(MinWidth(8)).with(HAlign::Right),
                ));
            }
            cols
        })
        .with_row(Row::new(
            Styles::default().with(Header(true)).with(Separator(true)),
            vec![
                "Pos".into(),
                "User".into(),
                "Points".into(),
                "Tendency".into(),
                "Result".into(),
                "Top".into(),
                "Outsider".into(),
                "Season".into(),
            ],
        ));

    for row in rows {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                format!("{}.", row.position).into(),
                row.user_name.clone().into(),
                format!("{}", row.points).into(),
                format!("{}", row.matches).into(),
                format!("{}", row.results).into(),
                format!("{}", row.extra_top).into(),
                format!("{}", row.extra_outsider).into(),
                format!("{}", row.extra_season).into(),
            ],
        ));
    }
    table
}

pub fn tabulate_frequencies(title: &str, frequencies: &[ResultFrequency]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Centred)),
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)).with(Separator(true)),
            vec![title.into(), "Share".into()],
        ));
    for frequency in frequencies {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                frequency.result.clone().into(),
                format!("{:.1}%", frequency.fraction * 100.0).into(),
            ],
        ));
    }
    table
}

/// Summary of a user's matchday points and form.
pub fn tabulate_user_summary(
    form: f64,
    box_plot: Option<&BoxPlot>,
    mean: f64,
    std_dev: f64,
) -> Table {
    let mut table = Table::default().with_cols(vec![
        Col::new(
            Styles::default()
                .with(Separator(true))
                .with(MinWidth(16))
                .with(HAlign::Left),
        ),
        Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Right)),
    ]);
    let mut push = |label: &str, value: f64| {
        table.push_row(Row::new(
            Styles::default(),
            vec![label.into(), format!("{value:.1}").into()],
        ));
    };
    push("Form", form);
    push("Mean points", mean);
    push("Std deviation", std_dev);
    if let Some(box_plot) = box_plot {
        push("Minimum", box_plot.minimum);
        push("Lower quartile", box_plot.lower_quartile);
        push("Median", box_plot.median);
        push("Upper quartile", box_plot.upper_quartile);
        push("Maximum", box_plot.maximum);
    }
    table
}
