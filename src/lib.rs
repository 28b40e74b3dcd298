// O console do sistema de aluguel de quartos: a interface fica nos
// comandos, a conversa com o backend nos gateways. Nenhuma regra de
// negócio mora aqui; o servidor é sempre a autoridade.

pub mod api;
pub mod commands;
pub mod common;
pub mod config;
pub mod models;
pub mod services;
pub mod session;
