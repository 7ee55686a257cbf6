use chrono::{DateTime, Local, TimeDelta};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

pub const HTTP_METHODS: &[&str] = &["GET", "POST", "PUT", "DELETE", "HEAD"];

pub const URLS: &[&str] = &[
    "/administrator/index.php",
    "/phocadocumentation",
    "/item/3d-stroked-ink-actions/8037850",
    "/item/archi-interior-design-joomla-template/14576483",
    "/item/august/13903079",
    "/item/aves-business-theme/12854860",
    "/item/bigc-shop-responsive-woocommerce-theme/14279188",
    "/item/cartoon-cavemen/14669255",
    "/images/stories/slideshow/almhuette_raith_02.jpg",
    "/templates/jp_hotel/js/moomenu.js",
    "/modules/mod_bowslideshow/tmpl/images/image_shadow.png",
];

pub const USERNAMES: &[&str] = &[
    "SMITH", "JOHNSON", "WILLIAMS", "JONES", "BROWN", "DAVIS", "MILLER", "WILSON", "MOORE",
    "TAYLOR",
];

pub const STATUSES: &[u16] = &[200, 201, 301, 404, 500];

const MAX_SIZE: u64 = 80_000;
const DATE_FORMAT: &str = "[%d/%b/%Y:%H:%M:%S %z]";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 6.0; rv:34.0) Gecko/20100101 Firefox/34.0";

/// Random CLF lines. The date only moves forward once per second.
#[derive(Debug)]
pub struct LineGenerator {
    rng: StdRng,
    stamp: DateTime<Local>,
    stamp_str: String,
}

impl LineGenerator {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_rng(&mut rand::rng()))
    }

    pub fn with_rng(rng: StdRng) -> Self {
        let stamp = Local::now();
        Self {
            rng,
            stamp,
            stamp_str: stamp.format(DATE_FORMAT).to_string(),
        }
    }

    pub fn next_line(&mut self) -> String {
        self.line_at(Local::now())
    }

    pub fn line_at(&mut self, now: DateTime<Local>) -> String {
        if now - self.stamp >= TimeDelta::seconds(1) {
            self.stamp = now;
            self.stamp_str = now.format(DATE_FORMAT).to_string();
        }

        let rng = &mut self.rng;
        let host = format!(
            "{}.{}.{}.{}",
            rng.random_range(0..255u8),
            rng.random_range(0..255u8),
            rng.random_range(0..255u8),
            rng.random_range(0..255u8)
        );
        let user = USERNAMES.choose(rng).copied().unwrap_or("-");
        let method = HTTP_METHODS.choose(rng).copied().unwrap_or("GET");
        let url = URLS.choose(rng).copied().unwrap_or("/");
        let status = STATUSES.choose(rng).copied().unwrap_or(200);
        let size = rng.random_range(0..MAX_SIZE);

        format!(
            "{host} - {user} {} \"{method} {url} HTTP/1.1\" {status} {size} \"-\" \"{USER_AGENT}\" \"-\"",
            self.stamp_str
        )
    }
}

impl Default for LineGenerator {
    fn default() -> Self {
        Self::new()
    }
}
