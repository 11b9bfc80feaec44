use std::fs;
use std::path::Path;

/// Load test HTML fixture by name
pub fn load_html_fixture(fixture_name: &str) -> String {
    let path = Path::new("src/tests/fixtures").join(format!("{}.html", fixture_name));
    fs::read_to_string(path)
        .unwrap_or_else(|_| panic!("Failed to load test fixture: {}", fixture_name))
}

/// Load a saved chart page for regression testing
pub fn load_failure_html(failure_name: &str) -> Option<String> {
    let path = Path::new("src/tests/fixtures/failures").join(format!("{}.html", failure_name));
    fs::read_to_string(path).ok()
}

/// A chart page in the live markup with `size` rows.
pub fn chart_page(size: usize) -> String {
    let rows: String = (1..=size)
        .map(|rank| {
            format!(
                r#"
        <li class="chart-list__element display--flex">
            <button class="chart-element__wrapper">
                <span class="chart-element__rank flex--column">
                    <span class="chart-element__rank__number">{rank}</span>
                </span>
                <span class="chart-element__information">
                    <span class="chart-element__information__song text--truncate color--primary">Song "{rank}"</span>
                    <span class="chart-element__information__artist text--truncate color--secondary">Artist {rank}, Friends</span>
                    <span class="chart-element__information__delta">
                        <span class="chart-element__information__delta__text text--default">-</span>
                    </span>
                </span>
                <span class="chart-element__trend">Steady</span>
                <span class="chart-element__meta text--center color--secondary text--last">{rank}</span>
                <span class="chart-element__meta text--center color--secondary text--peak">{rank}</span>
                <span class="chart-element__meta text--center color--secondary text--week">2</span>
            </button>
        </li>"#
            )
        })
        .collect();

    format!(
        "<html><head><title>Billboard Hot 100</title></head><body><ol class=\"chart-list__elements\">{}\n</ol></body></html>",
        rows
    )
}
