pub mod produto_service;
