mod chat;
mod cors;
mod extraction;
mod health;
mod response;
