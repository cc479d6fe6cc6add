// src/templates.rs
//! Static prompt text handed to the host's language model for structured
//! parameter extraction. Placeholders (`{{recentMessages}}`,
//! `{{supportedChains}}`, `{{walletInfo}}`) are filled by
//! [`compose_context`](crate::runtime::compose_context).

pub const BALANCE_TEMPLATE: &str = r#"You are an AI assistant specialized in processing cryptocurrency balance requests. Your task is to extract specific information from user messages and format it into a structured JSON response.

First, review the recent messages from the conversation:

<recent_messages>
{{recentMessages}}
</recent_messages>

Here's a list of supported chains:
<supported_chains>
{{supportedChains}}
</supported_chains>

Your goal is to extract the following information about the requested balance:
1. Chain to query (must be one of the supported chains)
2. Token symbol or address. If an address is provided, it must be a valid Ethereum address starting with "0x". For the native asset (e.g. ETH), set this field to null.
3. Address to check balance for. Optional, must be a valid Ethereum address starting with "0x". If not provided, use null and the wallet's own address will be used.

Before providing the final JSON output, show your reasoning process inside <analysis> tags. Follow these steps:

1. Identify the relevant information from the user's message:
   - Quote the part of the message mentioning the chain.
   - Quote the part mentioning the token (if any).
   - Quote the part mentioning the wallet address.

2. Validate each piece of information:
   - Chain: List all supported chains and check if the mentioned chain is in the list.
   - Token: Check if it's a native token (e.g., ETH) or an ERC-20 token (e.g., USDC).
   - Address: Check that it starts with "0x" and count the number of characters (should be 42).

3. If any information is missing or invalid, prepare an appropriate error message.

4. If all information is valid, summarize your findings.

After your analysis, provide the final output in a JSON markdown block. The JSON should have this structure:

```json
{
    "chain": string,
    "token": string | null,
    "address": string | null
}
```

Remember:
- The chain name must be a string and must exactly match one of the supported chains.
- The token field should be a string representing the token symbol or address. If it's a native token (e.g., ETH), set this field to null.
- The wallet address must be a valid Ethereum address starting with "0x", or null.

Now, process the user's request and provide your response.
"#;

pub const TRANSFER_TEMPLATE: &str = r#"You are an AI assistant specialized in processing cryptocurrency transfer requests. Your task is to extract specific information from user messages and format it into a structured JSON response.

First, review the recent messages from the conversation:

<recent_messages>
{{recentMessages}}
</recent_messages>

Here's a list of supported chains:
<supported_chains>
{{supportedChains}}
</supported_chains>

Your goal is to extract the following information about the requested transfer:
1. Chain to execute on (must be one of the supported chains)
2. Amount to transfer (in human units, without the coin symbol)
3. Recipient address (must be a valid Ethereum address)
4. Token symbol or address (null for a native token transfer)

Before providing the final JSON output, show your reasoning process inside <analysis> tags. Follow these steps:

1. Identify the relevant information from the user's message:
   - Quote the part of the message mentioning the chain.
   - Quote the part mentioning the amount.
   - Quote the part mentioning the recipient address.
   - Quote the part mentioning the token (if any).

2. Validate each piece of information:
   - Chain: List all supported chains and check if the mentioned chain is in the list.
   - Amount: Attempt to convert the amount to a number to verify it's valid.
   - Address: Check that it starts with "0x" and count the number of characters (should be 42).
   - Token: Note whether it's a native transfer or if a specific token is mentioned.

3. If any information is missing or invalid, prepare an appropriate error message.

4. If all information is valid, summarize your findings.

After your analysis, provide the final output in a JSON markdown block. All fields except 'token' are required. The JSON should have this structure:

```json
{
    "fromChain": string,
    "amount": string,
    "toAddress": string,
    "token": string | null
}
```

Remember:
- The chain name must be a string and must exactly match one of the supported chains.
- The amount should be a string representing the number without any currency symbol.
- The recipient address must be a valid Ethereum address starting with "0x".
- If no specific token is mentioned (i.e., it's a native token transfer), set the "token" field to null.

Now, process the user's request and provide your response.
"#;

pub const SWAP_TEMPLATE: &str = r#"Given the recent messages and wallet information below:

{{recentMessages}}

{{walletInfo}}

Extract the following information about the requested token swap:
- Input token symbol or address (the token being sold)
- Output token symbol or address (the token being bought)
- Amount to swap: Must be a string representing the amount in human units (only number without coin symbol, e.g., "0.1")
- Chain to execute on (one of: {{supportedChains}})

Respond with a JSON markdown block containing only the extracted values. Use null for any values that cannot be determined:

```json
{
    "inputToken": string,
    "outputToken": string,
    "amount": string,
    "chain": string,
    "slippage": number | null
}
```
"#;

pub const BRIDGE_TEMPLATE: &str = r#"Given the recent messages and wallet information below:

{{recentMessages}}

{{walletInfo}}

Extract the following information about the requested token bridge:
- Token symbol or address to bridge
- Source chain (one of: {{supportedChains}})
- Destination chain (one of: {{supportedChains}})
- Amount to bridge: Must be a string representing the amount in human units (only number without coin symbol, e.g., "0.1")
- Destination address (if specified)

Respond with a JSON markdown block containing only the extracted values. Use null for any values that cannot be determined:

```json
{
    "fromToken": string | null,
    "fromChain": string,
    "toChain": string,
    "toToken": string | null,
    "amount": string,
    "toAddress": string | null
}
```
"#;
