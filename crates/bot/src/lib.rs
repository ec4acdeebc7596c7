pub mod gateway;

use eyre::Result;
use gateway::{deliver, TgGateway};
use log::{error, info};
use reports::{service::ChatInfo, Reports};
use teloxide::{
    dispatching::UpdateFilterExt as _,
    dptree,
    prelude::{Dispatcher, Requester as _, ResponseResult},
    types::{BotCommand, Message, Update},
    Bot,
};

const ERROR: &str = "Jokin meni pieleen. Yritä myöhemmin uudelleen.";

fn commands() -> Vec<BotCommand> {
    vec![
        BotCommand::new("stats", "Tartuntatilastot alueittain"),
        BotCommand::new("charts", "Uudet tartunnat 30 päivän ajalta"),
        BotCommand::new("doublingtime", "Tartuntojen kaksinkertaistumisaika, valinnaisesti alueelle"),
        BotCommand::new("vaccinations", "Rokotusten eteneminen"),
        BotCommand::new("startupdates", "Ilmoitukset uusista tapauksista"),
        BotCommand::new("stopupdates", "Lopeta ilmoitukset"),
    ]
}

pub async fn start_bot(reports: Reports, token: String) -> Result<()> {
    let bot = Bot::new(token);
    bot.set_my_commands(commands()).await?;

    let channel_reports = reports.clone();
    let handler = dptree::entry()
        .branch(
            Update::filter_message().endpoint(move |bot: Bot, msg: Message| {
                message_handler(bot, msg, reports.clone())
            }),
        )
        .branch(
            Update::filter_channel_post().endpoint(move |bot: Bot, msg: Message| {
                message_handler(bot, msg, channel_reports.clone())
            }),
        );

    info!("Starting bot");
    Dispatcher::builder(bot, handler)
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
    Ok(())
}

fn chat_info(msg: &Message) -> ChatInfo {
    ChatInfo {
        id: msg.chat.id.0,
        title: msg
            .chat
            .title()
            .or_else(|| msg.chat.username())
            .unwrap_or_default()
            .to_string(),
    }
}

async fn message_handler(bot: Bot, msg: Message, reports: Reports) -> ResponseResult<()> {
    let text = match msg.text() {
        Some(text) => text,
        None => return Ok(()),
    };
    let chat = chat_info(&msg);

    match reports
        .process(text, Some(chat), timewindow::store_now())
        .await
    {
        Ok(reply) => {
            let gateway = TgGateway::new(bot);
            if let Err(err) = deliver(&gateway, Some(msg.chat.id.0), &reply).await {
                error!("Failed to answer {} in {}: {:#}", text, msg.chat.id, err);
            }
        }
        Err(err) => {
            error!("Failed to handle {} in {}: {:#}", text, msg.chat.id, err);
            bot.send_message(msg.chat.id, ERROR).await?;
        }
    }
    Ok(())
}
