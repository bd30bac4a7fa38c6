use estate_config::scrape::ScrapeConfig;
use estate_types::Sale;

use crate::date_range::normalize;

const HEADER: &str = "ESTATE SALES THIS WEEKEND";
const TITLE_WIDTH: usize = 45;

/// Plain-text summary of the sales, one block per sale
pub fn format_message(sales: &[Sale], config: &ScrapeConfig) -> String {
    if sales.is_empty() {
        return format!(
            "No estate sales found within {} miles this week.",
            config.max_distance_miles
        );
    }

    let mut lines = vec![
        HEADER.to_string(),
        format!("Near {}", config.area_label),
        String::new(),
    ];

    for (i, sale) in sales.iter().take(config.max_listings).enumerate() {
        let title: String = sale.title.chars().take(TITLE_WIDTH).collect();

        if sale.distance_label.is_empty() {
            lines.push(format!("{}. {}", i + 1, title));
        } else {
            lines.push(format!("{}. {} [{}]", i + 1, title, sale.distance_label));
        }

        let dates = normalize(&sale.raw_date_text);
        if !dates.is_empty() {
            lines.push(format!("   {dates}"));
        }

        lines.push(format!("   {}", sale.url));
        lines.push(String::new());
    }

    if sales.len() > config.max_listings {
        lines.push(format!(
            "+ {} more at {}",
            sales.len() - config.max_listings,
            config.base_url
        ));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sale(n: usize, distance_label: &str, dates: &str) -> Sale {
        Sale {
            title: format!("Sale {n}"),
            url: format!("https://www.estatesales.net/TX/Austin/78759/{n}"),
            distance_label: distance_label.to_string(),
            raw_date_text: dates.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn empty_list_mentions_radius() {
        let config = ScrapeConfig::default();
        assert_eq!(
            format_message(&[], &config),
            "No estate sales found within 15 miles this week."
        );

        let config = ScrapeConfig {
            max_distance_miles: 7.5,
            ..ScrapeConfig::default()
        };
        assert_eq!(
            format_message(&[], &config),
            "No estate sales found within 7.5 miles this week."
        );
    }

    #[test]
    fn formats_each_sale_block() {
        let sales = vec![
            sale(1, "Nearby", "Sat, Nov 8 9am to 1pm"),
            sale(2, "", "Going on now"),
        ];

        let expected = "\
ESTATE SALES THIS WEEKEND
Near Austin 78759

1. Sale 1 [Nearby]
   Nov 8, 9am-1pm
   https://www.estatesales.net/TX/Austin/78759/1

2. Sale 2
   https://www.estatesales.net/TX/Austin/78759/2
";

        assert_eq!(format_message(&sales, &ScrapeConfig::default()), expected);
    }

    #[test]
    fn long_titles_are_cut() {
        let mut long = sale(1, "", "");
        long.title = "ä".repeat(60);

        let message = format_message(&[long], &ScrapeConfig::default());
        let first = message.lines().nth(3).unwrap();

        assert_eq!(first, format!("1. {}", "ä".repeat(45)));
    }

    #[test]
    fn overflow_points_to_listing_page() {
        let sales: Vec<Sale> = (1..=13).map(|n| sale(n, "1 mi", "")).collect();
        let message = format_message(&sales, &ScrapeConfig::default());

        assert!(message.contains("10. Sale 10 [1 mi]"));
        assert!(!message.contains("11. Sale 11"));
        assert!(message.ends_with("+ 3 more at https://www.estatesales.net/TX/Austin/78759"));
    }
}
