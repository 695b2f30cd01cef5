/// Endpoints and timeouts for the two upstream services.
#[derive(Debug, Clone)]
pub struct Config {
    pub invest: InvestConfig,
    pub moex: MoexConfig,
}

#[derive(Debug, Clone)]
pub struct InvestConfig {
    pub base_url: String,
    pub app_name: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct MoexConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Config {
    pub fn builtin() -> Self {
        Config {
            invest: InvestConfig {
                base_url: "https://invest-public-api.tinkoff.ru/rest".to_string(),
                app_name: "tinvest-history".to_string(),
                timeout_secs: 30,
            },
            moex: MoexConfig {
                base_url: "https://iss.moex.com/iss/engines/stock/markets/shares/securities"
                    .to_string(),
                // The ISS probe is best-effort; it gets a short deadline.
                timeout_secs: 5,
            },
        }
    }
}
