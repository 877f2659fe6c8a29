use super::print_json;
use crate::errors::CliError;
use crate::println_pad;
use crate::utils::print_ansi_boxed_lines;
use colored::Colorize;
use ltk_game_data::static_data::{flatten_runes, resolve_champion_id};
use ltk_game_data::version::to_patch;
use ltk_game_data::GameData;
use miette::Result;

pub async fn show_version(data: &GameData, json: bool) -> Result<()> {
    let version = data.latest_version().await;
    let patch = to_patch(&version);

    if json {
        return print_json(&serde_json::json!({ "version": version, "patch": patch }));
    }

    print_ansi_boxed_lines(&[
        format!("{} {}", "Game version:".bright_white(), version.bright_cyan().bold()),
        format!("{} {}", "Analytics patch:".bright_white(), patch.bright_cyan()),
    ]);
    if version == data.versions().fallback() {
        println_pad!(
            "{}",
            "(fallback version, the static data provider may be unreachable)".dimmed()
        );
    }
    Ok(())
}

pub async fn list_champions(data: &GameData, filter: Option<String>, json: bool) -> Result<()> {
    let filter = filter.map(|f| f.to_lowercase());
    let champions: Vec<_> = data
        .champions()
        .await
        .into_iter()
        .filter(|c| match &filter {
            Some(f) => {
                c.name.to_lowercase().contains(f)
                    || c.tags.iter().any(|t| t.to_lowercase() == *f)
            }
            None => true,
        })
        .collect();

    if json {
        return print_json(&champions);
    }

    println_pad!(
        "{} {}",
        "🏆 Champions:".bright_blue().bold(),
        format!("({})", champions.len()).dimmed()
    );
    for champion in &champions {
        println_pad!(
            "   {} {} {} {}",
            format!("{:>4}", champion.key).dimmed(),
            champion.name.bright_cyan().bold(),
            champion.title.bright_white(),
            format!("[{}]", champion.tags.join(", ")).dimmed()
        );
    }
    Ok(())
}

pub async fn show_champion(data: &GameData, name: &str, json: bool) -> Result<()> {
    let champions = data.champions().await;
    let champion = resolve_champion_id(&champions, name)
        .and_then(|id| champions.iter().find(|c| c.numeric_id() == Some(id)))
        .ok_or_else(|| CliError::unknown_champion(name))?;

    let details = data
        .champion_details(&champion.id)
        .await
        .ok_or_else(|| CliError::unknown_champion(name))?;

    if json {
        return print_json(&details);
    }

    let icon = data.champion_icon_url(&champion.id).await;
    let passive_icon = data.passive_icon_url(&details.passive.image.full).await;

    println_pad!(
        "{} {}",
        details.champion.name.bright_cyan().bold(),
        details.champion.title.bright_white()
    );
    println_pad!("{} {}", "Tags:".bright_green(), details.champion.tags.join(", "));
    println_pad!("{} {}", "Icon:".bright_green(), icon.dimmed());
    println_pad!(
        "{} {}",
        "Splash:".bright_green(),
        data.assets().champion_splash(&champion.id, 0).dimmed()
    );

    println_pad!("\n{}", "✨ Passive:".bright_magenta().bold());
    println_pad!(
        "   {} {} {}",
        "•".bright_cyan(),
        details.passive.name.bright_cyan().bold(),
        passive_icon.dimmed()
    );

    println_pad!("\n{}", "🪄 Spells:".bright_magenta().bold());
    for spell in &details.spells {
        let cooldowns: Vec<String> = spell.cooldown.iter().map(|c| c.to_string()).collect();
        println_pad!(
            "   {} {} {}",
            "•".bright_cyan(),
            spell.name.bright_cyan().bold(),
            format!("(cooldown: {})", cooldowns.join("/")).dimmed()
        );
    }

    println_pad!(
        "\n{} {}",
        "🎨 Skins:".bright_magenta().bold(),
        details.skins.len().to_string().bright_white()
    );
    Ok(())
}

pub async fn list_items(data: &GameData, all: bool, json: bool) -> Result<()> {
    let items: Vec<_> = if all {
        data.items().await.into_iter().collect()
    } else {
        data.static_data()
            .purchasable_items(&data.config().locale)
            .await
    };

    if json {
        return print_json(&items);
    }

    println_pad!(
        "{} {}",
        "🛒 Items:".bright_blue().bold(),
        format!("({})", items.len()).dimmed()
    );
    for (id, item) in &items {
        println_pad!(
            "   {} {} {}",
            format!("{:>6}", id).dimmed(),
            item.name.bright_cyan().bold(),
            format!("{}g", item.gold.total).bright_yellow()
        );
    }
    Ok(())
}

pub async fn list_runes(data: &GameData, json: bool) -> Result<()> {
    let trees = data.runes().await;
    let runes = flatten_runes(&trees);

    if json {
        return print_json(&runes);
    }

    for tree in &trees {
        println_pad!("{}", tree.name.bright_magenta().bold());
        for rune in runes.iter().filter(|r| r.tree == tree.key) {
            println_pad!(
                "   {} {} {}",
                "•".bright_cyan(),
                rune.name.bright_cyan(),
                format!("({})", rune.id).dimmed()
            );
        }
    }
    Ok(())
}

pub async fn list_spells(data: &GameData, json: bool) -> Result<()> {
    let spells = data.summoner_spells().await;

    if json {
        return print_json(&spells);
    }

    println_pad!("{}", "🔮 Summoner spells:".bright_blue().bold());
    for spell in spells.values() {
        let cooldown = spell.cooldown.first().copied().unwrap_or_default();
        println_pad!(
            "   {} {} {}",
            "•".bright_cyan(),
            spell.name.bright_cyan().bold(),
            format!("({}s)", cooldown).dimmed()
        );
    }
    Ok(())
}
