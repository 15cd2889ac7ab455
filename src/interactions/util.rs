//! Shared interaction utility helpers (single defer, chunked edit + follow-ups, failure fallback).
use crate::constants::{GENERIC_FAILURE_REPLY, MESSAGE_CHAR_LIMIT};
use crate::util::split_message;
use async_trait::async_trait;
use serenity::builder::{
    CreateInteractionResponse, CreateInteractionResponseFollowup, CreateInteractionResponseMessage,
    EditInteractionResponse,
};
use serenity::model::application::CommandInteraction;
use serenity::prelude::Context;

/// Where a command's reply goes. The interaction is acknowledged up front and
/// the reply filled in afterwards, so slow work cannot outlive Discord's
/// three second acknowledgement window.
#[async_trait]
pub trait ReplyChannel: Send + Sync {
    /// Deferred acknowledgement ("thinking..."); must come before any slow work.
    async fn acknowledge(&self) -> Result<(), serenity::Error>;
    /// Replaces the deferred placeholder with the first chunk of the reply.
    async fn edit_original(&self, content: String) -> Result<(), serenity::Error>;
    async fn follow_up(&self, content: String) -> Result<(), serenity::Error>;
}

/// A live slash command interaction.
pub struct SlashReply<'a> {
    pub ctx: &'a Context,
    pub interaction: &'a CommandInteraction,
}

#[async_trait]
impl ReplyChannel for SlashReply<'_> {
    async fn acknowledge(&self) -> Result<(), serenity::Error> {
        self.interaction.defer(&self.ctx.http).await
    }

    async fn edit_original(&self, content: String) -> Result<(), serenity::Error> {
        self.interaction
            .edit_response(&self.ctx.http, EditInteractionResponse::new().content(content))
            .await?;
        Ok(())
    }

    async fn follow_up(&self, content: String) -> Result<(), serenity::Error> {
        self.interaction
            .create_followup(
                &self.ctx.http,
                CreateInteractionResponseFollowup::new().content(content),
            )
            .await?;
        Ok(())
    }
}

/// Fills in an acknowledged interaction with `content`, spilling anything over
/// the message limit into ordered follow-up messages.
pub async fn respond(channel: &dyn ReplyChannel, content: &str) -> Result<(), serenity::Error> {
    let mut chunks = split_message(content, MESSAGE_CHAR_LIMIT).into_iter();
    let first = chunks.next().unwrap_or_default();
    channel.edit_original(first).await?;
    for chunk in chunks {
        channel.follow_up(chunk).await?;
    }
    Ok(())
}

/// Tells the user their command failed. Edits the deferred reply when there is
/// one, otherwise answers the interaction directly; logs if neither works.
pub async fn respond_failure(ctx: &Context, interaction: &CommandInteraction) {
    let edited = interaction
        .edit_response(
            &ctx.http,
            EditInteractionResponse::new().content(GENERIC_FAILURE_REPLY),
        )
        .await;
    if let Err(first) = edited {
        tracing::debug!(target="ui.reply", error=?first, "failure edit rejected (not deferred?)");
        if let Err(e) = interaction
            .create_response(
                &ctx.http,
                CreateInteractionResponse::Message(
                    CreateInteractionResponseMessage::new().content(GENERIC_FAILURE_REPLY),
                ),
            )
            .await
        {
            tracing::error!(target="ui.reply", interaction_id=%interaction.id, error=?e, "could not deliver failure reply");
        }
    }
}
