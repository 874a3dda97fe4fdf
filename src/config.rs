use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// CSV with per-product average rating and rating count
    #[serde(default = "default_product_ratings_path")]
    pub product_ratings_path: String,

    /// CSV with the precomputed user-by-product predicted ratings
    #[serde(default = "default_predicted_ratings_path")]
    pub predicted_ratings_path: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// N used when a request does not specify one
    #[serde(default = "default_num_recommendations")]
    pub default_num_recommendations: usize,

    /// Upper bound accepted for N
    #[serde(default = "default_max_num_recommendations")]
    pub max_num_recommendations: usize,
}

fn default_product_ratings_path() -> String {
    "data/product_avg_ratings.csv".to_string()
}

fn default_predicted_ratings_path() -> String {
    "data/predicted_ratings_matrix.csv".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_num_recommendations() -> usize {
    10
}

fn default_max_num_recommendations() -> usize {
    20
}

impl Default for Config {
    fn default() -> Self {
        Self {
            product_ratings_path: default_product_ratings_path(),
            predicted_ratings_path: default_predicted_ratings_path(),
            host: default_host(),
            port: default_port(),
            default_num_recommendations: default_num_recommendations(),
            max_num_recommendations: default_max_num_recommendations(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Server bind address
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.max_num_recommendations == 0 {
            anyhow::bail!("MAX_NUM_RECOMMENDATIONS must be at least 1");
        }
        if self.default_num_recommendations == 0
            || self.default_num_recommendations > self.max_num_recommendations
        {
            anyhow::bail!(
                "DEFAULT_NUM_RECOMMENDATIONS must be between 1 and {}",
                self.max_num_recommendations
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
        assert_eq!(config.default_num_recommendations, 10);
        assert_eq!(config.max_num_recommendations, 20);
    }

    #[test]
    fn test_default_above_max_is_rejected() {
        let config = Config {
            default_num_recommendations: 30,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_deserialize_from_pairs() {
        let vars = vec![
            ("PORT".to_string(), "8080".to_string()),
            (
                "PRODUCT_RATINGS_PATH".to_string(),
                "/srv/ratings.csv".to_string(),
            ),
        ];
        let config: Config = envy::from_iter(vars).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.product_ratings_path, "/srv/ratings.csv");
        assert_eq!(config.predicted_ratings_path, "data/predicted_ratings_matrix.csv");
    }
}
