/// Builds CDN URLs for catalog images.
///
/// Versioned assets (icons) take the resolved game version; splash and
/// loading art and rune icons are served unversioned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetUrls {
    base_url: String,
}

impl AssetUrls {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn champion_icon(&self, version: &str, champion_id: &str) -> String {
        format!("{}/cdn/{}/img/champion/{}.png", self.base_url, version, champion_id)
    }

    pub fn champion_splash(&self, champion_id: &str, skin: u32) -> String {
        format!("{}/cdn/img/champion/splash/{}_{}.jpg", self.base_url, champion_id, skin)
    }

    pub fn champion_loading(&self, champion_id: &str, skin: u32) -> String {
        format!("{}/cdn/img/champion/loading/{}_{}.jpg", self.base_url, champion_id, skin)
    }

    pub fn item_icon(&self, version: &str, item_id: &str) -> String {
        format!("{}/cdn/{}/img/item/{}.png", self.base_url, version, item_id)
    }

    pub fn summoner_spell_icon(&self, version: &str, spell_id: &str) -> String {
        format!("{}/cdn/{}/img/spell/{}.png", self.base_url, version, spell_id)
    }

    /// `image_file` is the passive's `image.full`, extension included.
    pub fn passive_icon(&self, version: &str, image_file: &str) -> String {
        format!("{}/cdn/{}/img/passive/{}", self.base_url, version, image_file)
    }

    /// `icon_path` is a rune's `icon` field, e.g. `perk-images/Styles/...png`.
    pub fn rune_icon(&self, icon_path: &str) -> String {
        format!("{}/cdn/img/{}", self.base_url, icon_path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_urls() {
        let urls = AssetUrls::new("https://ddragon.leagueoflegends.com/");

        assert_eq!(
            urls.champion_icon("14.24.1", "Ahri"),
            "https://ddragon.leagueoflegends.com/cdn/14.24.1/img/champion/Ahri.png"
        );
        assert_eq!(
            urls.champion_splash("Ahri", 3),
            "https://ddragon.leagueoflegends.com/cdn/img/champion/splash/Ahri_3.jpg"
        );
        assert_eq!(
            urls.champion_loading("Ahri", 0),
            "https://ddragon.leagueoflegends.com/cdn/img/champion/loading/Ahri_0.jpg"
        );
        assert_eq!(
            urls.item_icon("14.24.1", "1001"),
            "https://ddragon.leagueoflegends.com/cdn/14.24.1/img/item/1001.png"
        );
        assert_eq!(
            urls.summoner_spell_icon("14.24.1", "SummonerFlash"),
            "https://ddragon.leagueoflegends.com/cdn/14.24.1/img/spell/SummonerFlash.png"
        );
        assert_eq!(
            urls.passive_icon("14.24.1", "Ahri_SoulEater2.png"),
            "https://ddragon.leagueoflegends.com/cdn/14.24.1/img/passive/Ahri_SoulEater2.png"
        );
        assert_eq!(
            urls.rune_icon("perk-images/Styles/7200_Domination.png"),
            "https://ddragon.leagueoflegends.com/cdn/img/perk-images/Styles/7200_Domination.png"
        );
    }
}
